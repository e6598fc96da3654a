// Domain layer - feed payloads, time alignment, extraction and risk rules
pub mod feed;
pub mod outcome;
pub mod place;
pub mod risk;
pub mod series;
pub mod snapshot;
pub mod time_index;
