pub mod response;

pub use response::AtsScore;
