//! Who-am-I report: the logged-in user, endpoint and target.

use std::io::Write;

use tracing::debug;

use crate::connection::CliConnection;
use crate::error::ReportError;

/// Write the session report for `conn` to `out`.
///
/// Fails before writing anything when no endpoint is set, the user is not
/// logged in, or the session has no username. The targeting line appears
/// only when both an organization and a space are targeted.
pub fn report<W: Write + ?Sized>(
    conn: &dyn CliConnection,
    out: &mut W,
) -> Result<(), ReportError> {
    let has_endpoint = conn
        .has_api_endpoint()
        .map_err(ReportError::query("HasAPIEndpoint"))?;
    if !has_endpoint {
        debug!("no API endpoint set");
        return Err(ReportError::NoApiEndpoint);
    }

    let logged_in = conn
        .is_logged_in()
        .map_err(ReportError::query("IsLoggedIn"))?;
    if !logged_in {
        debug!("not logged in");
        return Err(ReportError::NotLoggedIn);
    }

    let username = conn.username().map_err(ReportError::query("Username"))?;
    if username.is_empty() {
        debug!("logged in but username is empty");
        return Err(ReportError::InconsistentSession);
    }

    let endpoint = conn
        .api_endpoint()
        .map_err(ReportError::query("ApiEndpoint"))?;
    debug!(%username, %endpoint, "session found");
    writeln!(out, "You are logged in as '{username}' on '{endpoint}'")?;

    let has_org = conn
        .has_organization()
        .map_err(ReportError::query("HasOrganization"))?;
    let has_space = conn.has_space().map_err(ReportError::query("HasSpace"))?;
    if !(has_org && has_space) {
        debug!(has_org, has_space, "skipping target line");
        return Ok(());
    }

    let org = conn
        .current_organization()
        .map_err(ReportError::query("GetCurrentOrg"))?;
    let space = conn
        .current_space()
        .map_err(ReportError::query("GetCurrentSpace"))?;
    writeln!(
        out,
        "You are targeting org '{}' / space '{}'",
        org.name, space.name
    )?;

    Ok(())
}
