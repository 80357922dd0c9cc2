mod convert;
mod metadata;
mod options;
mod validate;

pub use convert::ConvertCmd;
pub use metadata::MetadataCmd;
pub use options::OptionsCmd;
pub use validate::ValidateCmd;
