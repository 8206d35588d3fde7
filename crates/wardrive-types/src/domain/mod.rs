mod access_point;
mod observation;
mod route;
mod session;

pub use access_point::AccessPoint;
pub use observation::Observation;
pub use route::RouteLine;
pub use session::Session;
