use failure::Fail;

#[derive(Debug, Fail, PartialEq)]
pub enum FuelError {
    /// The node listing command exited unsuccessfully; holds its stderr.
    #[fail(display = "{}", _0)]
    InputUnavailable(String),
    #[fail(display = "Failed to find required executable {}", _0)]
    ExecutableNotFound(String),
    #[fail(display = "Malformed node record: {}", _0)]
    MalformedRecord(String),
    #[fail(
        display = "Node {} has a role named _meta, which is reserved for host variables",
        _0
    )]
    ReservedGroup(String),
    #[fail(
        display = "Unsupported parameters for ({}) module: {}. Supported parameters include: {}",
        module, keys, supported
    )]
    UnsupportedParameters {
        module: String,
        keys: String,
        supported: String,
    },
    #[fail(display = "Invalid module arguments: {}", _0)]
    InvalidArguments(String),
    #[fail(display = "Configuration error: {}", _0)]
    Config(String),
}
