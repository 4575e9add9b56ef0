// LDAP mapping endpoints.
// Point users and teams at LDAP distinguished names.

use reqwest::Method;

use crate::error::{Error, Result};
use crate::response::Response;
use crate::types::{TeamLdapMapping, UserLdapMapping};

use super::{AdminHandler, path_segment};

impl AdminHandler<'_> {
    /// Update the LDAP mapping of a user. `mapping.ldap_dn` must be set.
    pub async fn update_user_ldap_mapping(
        &self,
        user: &str,
        mapping: &UserLdapMapping,
    ) -> Result<(UserLdapMapping, Response)> {
        let user = path_segment(user, "user")?;
        if mapping.ldap_dn.is_none() {
            return Err(Error::MissingField("ldap_dn"));
        }
        let path = format!("admin/ldap/users/{}/mapping", user);
        let request = self.client.new_json_request(Method::PATCH, &path, mapping)?;
        self.client.execute(request).await
    }

    /// Update the LDAP mapping of a team. `mapping.ldap_dn` must be set.
    pub async fn update_team_ldap_mapping(
        &self,
        team_id: u64,
        mapping: &TeamLdapMapping,
    ) -> Result<(TeamLdapMapping, Response)> {
        if mapping.ldap_dn.is_none() {
            return Err(Error::MissingField("ldap_dn"));
        }
        let path = format!("admin/ldap/teams/{}/mapping", team_id);
        let request = self.client.new_json_request(Method::PATCH, &path, mapping)?;
        self.client.execute(request).await
    }
}
