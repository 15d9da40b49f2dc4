use crate::domain::models::{ApiOutcome, AuthenticatedDepartment, Department, TokenStore};
use crate::error::RotaError;
use crate::services::api::RotaApi;

/// Confirms or refreshes the token of every department, in settings order.
///
/// Refreshed tokens are written into `tokens`, which is left marked as
/// modified; persisting it is up to the caller. On error the store still
/// holds every token obtained before the failing department.
pub fn authenticate<A: RotaApi + ?Sized>(
    api: &A,
    departments: &[Department],
    tokens: &mut TokenStore,
) -> anyhow::Result<Vec<AuthenticatedDepartment>> {
    let mut authenticated = Vec::with_capacity(departments.len());
    for d in departments {
        tracing::info!("Getting token for {} {}", d.system, d.shortname);
        let token = match usable_token(api, d, tokens) {
            Some(token) => token,
            None => {
                tracing::info!("New token required for {} {}", d.system, d.shortname);
                let token = login(api, d)?;
                tracing::info!("Saving token for {} {}", d.system, d.shortname);
                tokens.set(d.system, &d.shortname, token.clone());
                token
            }
        };
        authenticated.push(AuthenticatedDepartment {
            shortname: d.shortname.clone(),
            system: d.system,
            endpoint: format!("{}{}", api.base_url(d), token),
        });
    }
    Ok(authenticated)
}

fn usable_token<A: RotaApi + ?Sized>(
    api: &A,
    department: &Department,
    tokens: &TokenStore,
) -> Option<String> {
    let token = tokens.get(department.system, &department.shortname)?;
    match api.check_token(department, token) {
        Ok(ApiOutcome::Success(())) => Some(token.to_string()),
        Ok(_) => None,
        Err(e) => {
            tracing::info!(
                "token check failed for {} {}: {:#}",
                department.system,
                department.shortname,
                e
            );
            None
        }
    }
}

fn login<A: RotaApi + ?Sized>(api: &A, department: &Department) -> anyhow::Result<String> {
    match api.login(department)? {
        ApiOutcome::Success(token) => Ok(token),
        ApiOutcome::Rejected(message) => Err(RotaError::LoginRejected {
            system: department.system,
            shortname: department.shortname.clone(),
            message,
        }
        .into()),
        ApiOutcome::AuthRequired => Err(RotaError::LoginRejected {
            system: department.system,
            shortname: department.shortname.clone(),
            message: "credentials not accepted".to_string(),
        }
        .into()),
    }
}
