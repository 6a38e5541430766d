mod requests;
mod responses;
mod validated;

pub use requests::*;
pub use responses::*;
pub use validated::ValidatedJson;
