pub mod dates;
pub mod logging;
pub mod money;
pub mod response;
