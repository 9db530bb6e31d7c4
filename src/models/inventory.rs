model_use!();

use crate::models::node::{Node, NodeStatus};

/// Key under which Ansible expects host variables in a dynamic inventory.
pub const META_KEY: &str = "_meta";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HostVars {
    pub name: String,
    pub online: bool,
    pub os_platform: String,
    pub status: NodeStatus,
    pub ip: String,
    pub mac: String,
    pub cluster: u64,
    pub ansible_ssh_host: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct InventoryMeta {
    pub hostvars: BTreeMap<String, HostVars>,
}

/// Ansible dynamic inventory: group name to member hostnames, plus host
/// variables under `_meta`.
///
/// Member lists keep the order in which nodes were seen and are never
/// deduplicated.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct Inventory {
    #[serde(rename = "_meta")]
    pub meta: InventoryMeta,
    #[serde(flatten)]
    pub groups: BTreeMap<String, Vec<String>>,
}

impl Inventory {
    /// Group managed nodes by role, cluster, hardware vendor and node id.
    ///
    /// Fails without returning a partial inventory if a managed node has no
    /// cluster or claims the `_meta` role.
    pub fn build(nodes: &[Node]) -> Result<Inventory, Error> {
        let mut inventory = Inventory::default();

        for node in nodes {
            if !node.is_managed() {
                debug!(
                    "Skipping {} (status {}, online {}, pending deletion {})",
                    node.hostname, node.status, node.online, node.pending_deletion
                );
                continue;
            }
            inventory.add_node(node)?;
        }

        debug!(
            "Inventory has {} groups and {} hosts",
            inventory.groups.len(),
            inventory.meta.hostvars.len()
        );
        Ok(inventory)
    }

    fn add_node(&mut self, node: &Node) -> Result<(), FuelError> {
        let hostname = &node.hostname;
        let cluster = node.cluster.ok_or_else(|| {
            FuelError::MalformedRecord(format!(
                "node {} ({}) is {} but has no cluster",
                node.id, hostname, node.status
            ))
        })?;

        for role in node.role_names() {
            if role == META_KEY {
                return Err(FuelError::ReservedGroup(hostname.clone()));
            }
            if role.is_empty() {
                warn!("Node {} has an empty role name", hostname);
            }
            self.add_host(role, hostname);
        }
        self.add_host(&format!("cluster-{}", cluster), hostname);
        self.add_host(&format!("hw-{}-servers", node.hw_vendor()), hostname);
        self.add_host(&format!("node-{}", node.id), hostname);

        let vars = HostVars {
            name: hostname.clone(),
            online: node.online,
            os_platform: node.os_platform.clone(),
            status: node.status.clone(),
            ip: node.ip.clone(),
            mac: node.mac.clone(),
            cluster,
            ansible_ssh_host: node.ip.clone(),
        };
        if self.meta.hostvars.insert(hostname.clone(), vars).is_some() {
            warn!("Hostname {} reported more than once, keeping the last", hostname);
        }
        Ok(())
    }

    fn add_host(&mut self, group: &str, hostname: &str) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .push(hostname.to_string());
    }

    pub fn group(&self, name: &str) -> Option<&[String]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn hostvars(&self, hostname: &str) -> Option<&HostVars> {
        self.meta.hostvars.get(hostname)
    }

    pub fn to_value(&self) -> Result<Value, Error> {
        Ok(serde_json::to_value(self)?)
    }
}
