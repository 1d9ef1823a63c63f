pub mod dispatcher;

pub use dispatcher::{ApiRequest, Dispatcher};
