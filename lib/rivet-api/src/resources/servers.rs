//! Admin view of the servers in a cluster.
//!
//! Every endpoint takes the same [`ServerFilter`]. An empty filter matches
//! every server in the cluster.

use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::resource_client;
use crate::caller::NO_BODY;
use crate::{Endpoint, Error, HttpClient, Method, QueryParams, Raw, Result};

const SERVERS: &str = "/admin/clusters/{cluster_id}/servers";
const TAINT: &str = "/admin/clusters/{cluster_id}/servers/taint";
const DESTROY: &str = "/admin/clusters/{cluster_id}/servers/destroy";
const LOST: &str = "/admin/clusters/{cluster_id}/servers/lost";
const PRUNE: &str = "/admin/clusters/{cluster_id}/servers/prune";

/// What a pool of servers is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolType {
    #[display("job")]
    Job,
    #[display("gg")]
    Gg,
    #[display("ats")]
    Ats,
    #[display("pegboard")]
    Pegboard,
    #[display("pegboard_isolate")]
    PegboardIsolate,
    #[display("fdb")]
    Fdb,
}

/// Parses the wire name, as accepted in the `pool` query parameter.
impl FromStr for PoolType {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        serde_json::from_value(serde_json::Value::String(name.to_owned()))
            .map_err(|_| Error::invalid_request(format!("unknown pool type: {name}")))
    }
}

/// A provisioned server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    /// Server ID.
    pub server_id: Uuid,
    /// Datacenter hosting the server.
    pub datacenter_id: Uuid,
    /// Pool the server belongs to.
    pub pool_type: PoolType,
    /// Absent until the server has been assigned an address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_ip: Option<String>,
    /// Provisioning time, milliseconds since the Unix epoch.
    pub start_ts: i64,
}

/// Result of [`ServersClient::list`] and [`ServersClient::list_lost`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListServersResponse {
    /// Matching servers.
    pub servers: Vec<Server>,
}

/// Narrows which servers an admin call acts on.
///
/// ```
/// use rivet_api::resources::servers::{PoolType, ServerFilter};
///
/// let filter = ServerFilter::new().pool(PoolType::Gg).datacenter("lnd-atl");
/// assert_eq!(filter.to_query().encode().as_deref(), Some("datacenter=lnd-atl&pool=gg"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerFilter {
    /// A single server.
    pub server_id: Option<Uuid>,
    /// Datacenter name ID.
    pub datacenter: Option<String>,
    /// Pool type.
    pub pool: Option<PoolType>,
    /// Public IP address.
    pub public_ip: Option<String>,
}

impl ServerFilter {
    /// Matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the server with this ID.
    #[must_use]
    pub fn server_id(mut self, server_id: Uuid) -> Self {
        self.server_id = Some(server_id);
        self
    }

    /// Only servers in this datacenter.
    #[must_use]
    pub fn datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenter = Some(datacenter.into());
        self
    }

    /// Only servers in this pool.
    #[must_use]
    pub fn pool(mut self, pool: PoolType) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Only the server with this public IP.
    #[must_use]
    pub fn public_ip(mut self, public_ip: impl Into<String>) -> Self {
        self.public_ip = Some(public_ip.into());
        self
    }

    /// The filter as query parameters, in wire order.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with("server_id", self.server_id)
            .with("datacenter", self.datacenter.as_deref())
            .with("pool", self.pool)
            .with("public_ip", self.public_ip.as_deref())
    }
}

resource_client! {
    /// Endpoints under `/admin/clusters/{cluster_id}/servers`.
    ///
    /// Requires an admin token.
    ServersClient
}

impl<C: HttpClient> ServersClient<C> {
    fn endpoint(template: &'static str, cluster_id: Uuid, filter: &ServerFilter) -> Endpoint {
        Endpoint::new(template)
            .path(cluster_id)
            .query_params(filter.to_query())
    }

    /// Servers matching `filter`.
    pub async fn list(&self, cluster_id: Uuid, filter: &ServerFilter) -> Result<Raw<ListServersResponse>> {
        let endpoint = Self::endpoint(SERVERS, cluster_id, filter);
        self.caller.call(Method::Get, endpoint, NO_BODY, &self.options).await
    }

    /// Mark matching servers for replacement.
    pub async fn taint(&self, cluster_id: Uuid, filter: &ServerFilter) -> Result<()> {
        let endpoint = Self::endpoint(TAINT, cluster_id, filter);
        self.caller
            .call_empty(Method::Post, endpoint, NO_BODY, &self.options)
            .await
    }

    /// Destroy matching servers.
    pub async fn destroy(&self, cluster_id: Uuid, filter: &ServerFilter) -> Result<()> {
        let endpoint = Self::endpoint(DESTROY, cluster_id, filter);
        self.caller
            .call_empty(Method::Post, endpoint, NO_BODY, &self.options)
            .await
    }

    /// Servers the provider still bills for but the cluster lost track of.
    pub async fn list_lost(
        &self,
        cluster_id: Uuid,
        filter: &ServerFilter,
    ) -> Result<Raw<ListServersResponse>> {
        let endpoint = Self::endpoint(LOST, cluster_id, filter);
        self.caller.call(Method::Get, endpoint, NO_BODY, &self.options).await
    }

    /// Delete lost servers at the provider.
    pub async fn prune(&self, cluster_id: Uuid, filter: &ServerFilter) -> Result<()> {
        let endpoint = Self::endpoint(PRUNE, cluster_id, filter);
        self.caller
            .call_empty(Method::Post, endpoint, NO_BODY, &self.options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    #[test]
    fn empty_filter_has_no_query() {
        check!(ServerFilter::new().to_query().encode().is_none());
    }

    #[test]
    fn filter_keeps_wire_order() {
        let server_id = Uuid::nil();
        let filter = ServerFilter::new()
            .public_ip("10.0.0.1")
            .pool(PoolType::PegboardIsolate)
            .server_id(server_id);

        check!(
            filter.to_query().encode().as_deref()
                == Some("server_id=00000000-0000-0000-0000-000000000000&pool=pegboard_isolate&public_ip=10.0.0.1")
        );
    }

    #[test]
    fn pool_type_parses_wire_names() {
        check!("pegboard_isolate".parse::<PoolType>().ok() == Some(PoolType::PegboardIsolate));
        check!("gg".parse::<PoolType>().ok() == Some(PoolType::Gg));
        check!(matches!("Gg".parse::<PoolType>(), Err(Error::InvalidRequest(_))));
        check!("".parse::<PoolType>().is_err());
    }

    #[test]
    fn pool_type_display_matches_serde() {
        for pool in [
            PoolType::Job,
            PoolType::Gg,
            PoolType::Ats,
            PoolType::Pegboard,
            PoolType::PegboardIsolate,
            PoolType::Fdb,
        ] {
            let json = serde_json::to_string(&pool).expect("encode");
            check!(json == format!("\"{pool}\""));
        }
    }
}
