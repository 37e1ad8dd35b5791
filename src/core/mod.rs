// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use filters::{filter_program_year, find_common_elements, partition_roster};
pub use matcher::{compute_match_groups, MatchError, Matcher};
pub use scoring::calculate_matching_rate;
