pub mod logging;
pub mod powershell;
pub mod validator;
