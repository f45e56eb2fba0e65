use cluster_api::api::{self, Application, ConfigMap, Host, HostRegistry, Node, NodeRegistry};
use kindgen_runtime::{
	core::BaseApiObj,
	registry::{Kind, ObjectRegistry},
	ContentHash, DeepCopy, Encode, ObjectKind,
};

fn host() -> Host {
	Host {
		base: BaseApiObj::namespaced("web-1", "prod").with_label("tier", "frontend"),
		address: "10.0.0.7".to_owned(),
		cpus: 8,
	}
}

#[test]
fn deep_copy_is_independent() {
	let original = host();
	let mut copy = original.deep_copy();
	copy.base.labels.insert("tier".to_owned(), "backend".to_owned());
	assert_eq!(original.base.labels["tier"], "frontend");

	let mut target = ConfigMap::default();
	let config = ConfigMap {
		base: BaseApiObj::new("settings"),
		data: [("mode".to_owned(), "fast".to_owned())].into(),
	};
	config.deep_copy_into(&mut target);
	assert_eq!(target, config);
}

#[test]
fn hash_depends_on_kind_and_content() {
	let a = host();
	assert_eq!(a.content_hash().unwrap(), host().content_hash().unwrap());

	let mut b = host();
	b.cpus = 16;
	assert_ne!(a.content_hash().unwrap(), b.content_hash().unwrap());

	let node = Node {
		base: BaseApiObj::new("web-1"),
		ready: false,
	};
	let app = Application {
		base: BaseApiObj::new("web-1"),
		image: "shop:1".to_owned(),
		replicas: 1,
		host_names: vec![],
	};
	assert_ne!(node.content_hash().unwrap(), app.content_hash().unwrap());
	assert_eq!(node.content_hash().unwrap().as_str().len(), 64);
}

#[test]
fn encode_is_canonical() {
	let encoded = host().encode().unwrap();
	assert_eq!(
		String::from_utf8(encoded.clone()).unwrap(),
		r#"{"address":"10.0.0.7","cpus":8,"labels":{"tier":"frontend"},"name":"web-1","namespace":"prod"}"#
	);
	assert_eq!(Host::decode(&encoded).unwrap(), host());
	assert!(Host::decode(b"{").is_err());

	let envelope = String::from_utf8(host().encode_envelope().unwrap()).unwrap();
	assert!(envelope.starts_with(r#"{"OpCode":0,"OpDesc":"","Data":{"address":"10.0.0.7""#));
}

#[test]
fn application_defaults_on_decode() {
	let app = Application::decode(br#"{"name":"shop","image":"shop:2"}"#).unwrap();
	assert_eq!(app.replicas, 1);
	assert!(app.host_names.is_empty());
}

#[test]
fn kinds_table() {
	let names: Vec<_> = api::KINDS.iter().map(|info| info.name).collect();
	assert_eq!(names, ["Application", "Host", "Node"]);

	assert!(HostRegistry::is_namespaced());
	assert!(!NodeRegistry::is_namespaced());
	assert_eq!(HostRegistry::INFO.resource, "hosts");
	assert_eq!(NodeRegistry::name(), "Node");

	assert_eq!(api::kind_info("Application").map(|i| i.resource), Some("applications"));
	assert_eq!(api::kind_info("ConfigMap"), None);

	assert_eq!(Host::KIND, "Host");
	assert_eq!(ConfigMap::KIND, "ConfigMap");
}

#[test]
fn register_kinds_fills_registry() {
	let mut registry = ObjectRegistry::new();
	api::register_kinds(&mut registry);
	assert_eq!(registry.len(), 3);
	assert_eq!(registry.is_namespaced("Application"), Some(true));
	assert_eq!(registry.by_resource("nodes").map(|i| i.name), Some("Node"));
}
