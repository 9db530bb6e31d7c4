model_use!();

use std::fmt;
use std::ops::Deref;

/// Provisioning state of a node as reported by Fuel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeStatus {
    Ready,
    Discover,
    Provisioning,
    Provisioned,
    Deploying,
    Error,
    Removing,
    Stopped,
    Other(String),
}

impl NodeStatus {
    pub fn as_str(&self) -> &str {
        match self {
            NodeStatus::Ready => "ready",
            NodeStatus::Discover => "discover",
            NodeStatus::Provisioning => "provisioning",
            NodeStatus::Provisioned => "provisioned",
            NodeStatus::Deploying => "deploying",
            NodeStatus::Error => "error",
            NodeStatus::Removing => "removing",
            NodeStatus::Stopped => "stopped",
            NodeStatus::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for NodeStatus {
    fn from(s: String) -> NodeStatus {
        match s.as_str() {
            "ready" => NodeStatus::Ready,
            "discover" => NodeStatus::Discover,
            "provisioning" => NodeStatus::Provisioning,
            "provisioned" => NodeStatus::Provisioned,
            "deploying" => NodeStatus::Deploying,
            "error" => NodeStatus::Error,
            "removing" => NodeStatus::Removing,
            "stopped" => NodeStatus::Stopped,
            _ => NodeStatus::Other(s),
        }
    }
}

impl From<NodeStatus> for String {
    fn from(status: NodeStatus) -> String {
        match status {
            NodeStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemMeta {
    pub manufacturer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeMeta {
    pub system: SystemMeta,
}

/// One entry of `fuel node --json`. Fields not needed for the inventory are
/// ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    pub id: u64,
    pub hostname: String,
    /// Unallocated nodes have no cluster.
    pub cluster: Option<u64>,
    pub roles: String,
    pub status: NodeStatus,
    pub online: bool,
    pub pending_deletion: bool,
    pub ip: String,
    pub mac: String,
    pub os_platform: String,
    pub meta: NodeMeta,
}

impl Node {
    /// Nodes being deleted, offline, deploying or still in discovery are left
    /// out of the inventory.
    pub fn is_managed(&self) -> bool {
        !self.pending_deletion
            && self.online
            && self.status != NodeStatus::Deploying
            && self.status != NodeStatus::Discover
    }

    /// Role names with surrounding whitespace removed. An empty role string
    /// yields a single empty name.
    pub fn role_names(&self) -> impl Iterator<Item = &str> {
        self.roles.split(',').map(str::trim)
    }

    pub fn hw_vendor(&self) -> String {
        self.meta.system.manufacturer.to_lowercase()
    }
}

model_impl!(Node);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct NodeList {
    pub nodes: Vec<Node>,
}

impl Deref for NodeList {
    type Target = [Node];

    fn deref(&self) -> &[Node] {
        &self.nodes
    }
}

model_impl!(NodeList);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs::File;

    fn sample() -> Value {
        json!({
            "id": 24,
            "hostname": "node-24",
            "cluster": 4,
            "roles": "controller,mongo",
            "status": "ready",
            "online": true,
            "pending_deletion": false,
            "ip": "10.20.11.11",
            "mac": "74:4a:a4:01:73:50",
            "os_platform": "ubuntu",
            "meta": {"system": {"manufacturer": "Zte"}}
        })
    }

    #[test]
    fn test_node_from_file() {
        let fh = File::open("fixtures/fuel-nodes-sample.json").unwrap();
        let nodes = NodeList::from_json(fh).unwrap();
        assert_eq!(nodes.len(), 1);

        let node = &nodes[0];
        assert_eq!(node.id, 24);
        assert_eq!(node.hostname, "node-24");
        assert_eq!(node.cluster, Some(4));
        assert_eq!(node.status, NodeStatus::Ready);
        assert_eq!(node.meta.system.manufacturer, "Zte");
    }

    #[test]
    fn test_node_from_value() {
        let node = Node::try_from(sample()).unwrap();
        assert_eq!(node.role_names().collect::<Vec<_>>(), vec!["controller", "mongo"]);
        assert_eq!(node.hw_vendor(), "zte");
        assert!(node.is_managed());
    }

    #[test]
    fn test_missing_manufacturer() {
        let mut val = sample();
        val["meta"]["system"] = json!({"product": "R620"});
        let err = Node::try_from(val).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed node record: missing field `manufacturer`"
        );
    }

    #[test]
    fn test_wrong_shape() {
        let mut val = sample();
        val["online"] = json!("yes");
        let err = Node::try_from(val).unwrap_err();
        match err.downcast_ref::<FuelError>() {
            Some(FuelError::MalformedRecord(msg)) => assert!(msg.contains("invalid type")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_null_cluster() {
        let mut val = sample();
        val["cluster"] = Value::Null;
        val["status"] = json!("discover");
        let node = Node::try_from(val).unwrap();
        assert_eq!(node.cluster, None);
        assert!(!node.is_managed());
    }

    #[test]
    fn test_status_round_trips_unknown_values() {
        let status: NodeStatus = serde_json::from_value(json!("maintenance")).unwrap();
        assert_eq!(status, NodeStatus::Other(String::from("maintenance")));
        assert_eq!(serde_json::to_value(&status).unwrap(), json!("maintenance"));
        assert_eq!(
            serde_json::to_value(&NodeStatus::Provisioned).unwrap(),
            json!("provisioned")
        );
    }

    #[test]
    fn test_is_managed() {
        let base = Node::try_from(sample()).unwrap();

        let mut node = base.clone();
        node.pending_deletion = true;
        assert!(!node.is_managed());

        let mut node = base.clone();
        node.online = false;
        assert!(!node.is_managed());

        let mut node = base.clone();
        node.status = NodeStatus::Deploying;
        assert!(!node.is_managed());

        let mut node = base.clone();
        node.status = NodeStatus::Error;
        assert!(node.is_managed());
    }

    #[test]
    fn test_role_names() {
        let mut node = Node::try_from(sample()).unwrap();
        node.roles = String::from(" compute , cinder,ceph-osd ");
        assert_eq!(
            node.role_names().collect::<Vec<_>>(),
            vec!["compute", "cinder", "ceph-osd"]
        );

        node.roles = String::new();
        assert_eq!(node.role_names().collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn test_node_list_from_str() {
        let nodes: NodeList = "[]".parse().unwrap();
        assert!(nodes.is_empty());

        let err = "{}".parse::<NodeList>().unwrap_err();
        assert!(err.to_string().starts_with("Malformed node record"));
    }
}
