use crate::domain::models::{ApiOutcome, AuthenticatedDepartment, DateWindow, RotaRecord};
use crate::error::RotaError;
use crate::services::api::RotaApi;

/// Reads `person_rota` from every department and concatenates the results in
/// department order.
pub fn fetch_rota<A: RotaApi + ?Sized>(
    api: &A,
    departments: &[AuthenticatedDepartment],
    window: &DateWindow,
) -> anyhow::Result<Vec<RotaRecord>> {
    let mut all = Vec::new();
    for d in departments {
        match api.person_rota(d, window)? {
            ApiOutcome::Success(records) => {
                tracing::info!(
                    "Received {} rota records from {} {}",
                    records.len(),
                    d.system,
                    d.shortname
                );
                all.extend(records);
            }
            ApiOutcome::Rejected(message) => {
                return Err(RotaError::ReadRejected {
                    system: d.system,
                    shortname: d.shortname.clone(),
                    message,
                }
                .into())
            }
            ApiOutcome::AuthRequired => {
                return Err(RotaError::ReadRejected {
                    system: d.system,
                    shortname: d.shortname.clone(),
                    message: "token no longer accepted".to_string(),
                }
                .into())
            }
        }
    }
    Ok(all)
}
