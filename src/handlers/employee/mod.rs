// handlers/employee/mod.rs - /employee/* endpoints

pub mod add;
pub mod get;
pub mod list;
pub mod login;
pub mod remove;
pub mod update;

pub use add::add_employee;
pub use get::get_employee;
pub use list::all_employees;
pub use login::login;
pub use remove::remove_employee;
pub use update::update_employee;
