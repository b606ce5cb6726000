pub mod answer;
pub mod grade;
pub mod quiz;
pub mod stats;
