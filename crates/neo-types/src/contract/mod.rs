mod method_token;
mod nef_file;
mod parameter;
mod parameter_type;

pub use method_token::MethodToken;
pub use nef_file::NefFile;
pub use parameter::{ContractParameter, ContractParameterMap, ParameterValue};
pub use parameter_type::ContractParameterType;
