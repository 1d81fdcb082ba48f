use strum::{Display, EnumString};

/// Runtime environment, selected through `APP_ENVIRONMENT` and used to pick
/// the `config/{environment}.toml` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}
