pub mod build;
pub mod check;
pub mod session_list;
pub mod vendor_lookup;
