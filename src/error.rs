use crate::domain::models::SystemKind;

#[derive(thiserror::Error, Debug)]
pub enum RotaError {
    #[error("System must be one of: clwrota, medirota (got '{0}')")]
    UnknownSystem(String),
    #[error("All additional_fields keys must be in return_data_set (missing '{0}')")]
    AdditionalFieldNotReturned(String),
    #[error("Ensure day_range is an integer")]
    InvalidDayRange,
    #[error("day_range {0} takes the reporting period outside the supported calendar")]
    DayRangeOutOfRange(i64),
    #[error("tokens for '{0}' must map department names to a token string or null")]
    InvalidTokens(String),
    #[error("return_data_set value for '{0}' must be a string")]
    InvalidColumnName(String),
    #[error("login rejected for {system} {shortname}: {message}")]
    LoginRejected {
        system: SystemKind,
        shortname: String,
        message: String,
    },
    #[error("person rota request rejected for {system} {shortname}: {message}")]
    ReadRejected {
        system: SystemKind,
        shortname: String,
        message: String,
    },
    #[error("Unknown key in return_data_set: '{0}'")]
    UnknownReturnKey(String),
    #[error("invalid ISO value for '{field}': {value}")]
    InvalidDate { field: String, value: String },
}
