use argmap_core::{
    ArgumentMap, LayoutConfig, MapOutput, NodeId, Polarity, PointI, Routing, SeedTree, Vote,
};

fn root_only() -> ArgumentMap {
    ArgumentMap::from_seed(SeedTree::single_root("1", "Claim", "Tester"), LayoutConfig::default())
        .unwrap()
}

fn add_committed(map: &mut ArgumentMap, parent: &str, polarity: Polarity, text: &str) -> NodeId {
    let id = map.add_child(parent, polarity).unwrap();
    assert!(map.commit_edit(id.as_str(), text));
    id
}

fn pos(map: &ArgumentMap, id: &NodeId) -> PointI {
    map.node(id.as_str()).unwrap().position
}

#[test]
fn test_first_child_is_centred_below_parent() {
    let mut map = root_only();
    let id = map.add_child("1", Polarity::Support).unwrap();
    assert_eq!(pos(&map, &id), PointI { x: 0, y: 280 });
}

#[test]
fn test_second_child_flips_routing() {
    let mut map = root_only();
    let a = add_committed(&mut map, "1", Polarity::Support, "A");
    assert_eq!(map.edge("1", a.as_str()).unwrap().routing, Routing::Direct);

    let b = map.add_child("1", Polarity::Objection).unwrap();
    assert_eq!(map.edge("1", a.as_str()).unwrap().routing, Routing::Branching);
    assert_eq!(map.edge("1", b.as_str()).unwrap().routing, Routing::Branching);
}

#[test]
fn test_support_and_objection_straddle_parent() {
    let mut map = root_only();
    let a = add_committed(&mut map, "1", Polarity::Support, "A");
    let b = map.add_child("1", Polarity::Objection).unwrap();

    let root = map.node("1").unwrap().position;
    let (pa, pb) = (pos(&map, &a), pos(&map, &b));

    assert!(pa.x < root.x && root.x < pb.x);
    assert_eq!(pa.y, root.y + 280);
    assert_eq!(pb.y, root.y + 280);
    map.check_invariants().unwrap();
}

#[test]
fn test_supports_keep_creation_order() {
    let mut map = root_only();
    let a = add_committed(&mut map, "1", Polarity::Support, "A");
    let b = add_committed(&mut map, "1", Polarity::Support, "B");
    let c = add_committed(&mut map, "1", Polarity::Support, "C");

    let root_x = map.node("1").unwrap().position.x;
    let offsets: Vec<i32> = [&a, &b, &c].iter().map(|id| root_x - pos(&map, id).x).collect();

    assert!(offsets[0] > 0);
    assert!(offsets[0] < offsets[1] && offsets[1] < offsets[2], "offsets {:?}", offsets);
}

#[test]
fn test_supports_keep_creation_order_as_drafts() {
    let mut map = root_only();
    let a = map.add_child("1", Polarity::Support).unwrap();
    let b = map.add_child("1", Polarity::Support).unwrap();
    let c = map.add_child("1", Polarity::Support).unwrap();

    // Redistribution fans them to -350 / -700 / -1050; the wider editing boxes
    // then make the rebalancer walk the inner two back towards the parent.
    assert_eq!(pos(&map, &a), PointI { x: 0, y: 280 });
    assert_eq!(pos(&map, &b), PointI { x: -525, y: 280 });
    assert_eq!(pos(&map, &c), PointI { x: -1050, y: 280 });
    assert!(pos(&map, &a).x > pos(&map, &b).x && pos(&map, &b).x > pos(&map, &c).x);
}

#[test]
fn test_cancel_under_populated_parent_restores_siblings() {
    let mut map = root_only();
    add_committed(&mut map, "1", Polarity::Support, "A");
    add_committed(&mut map, "1", Polarity::Support, "B");
    let nodes = map.nodes().to_vec();

    let draft = map.add_child("1", Polarity::Support).unwrap();
    // "B" is pushed in from -700 while the draft is open
    assert_eq!(map.nodes()[2].position, PointI { x: -525, y: 280 });
    assert_eq!(nodes[2].position, PointI { x: -700, y: 280 });
    map.cancel_edit(draft.as_str());

    assert_eq!(map.nodes(), nodes.as_slice());
}

#[test]
fn test_cancelled_draft_leaves_no_trace() {
    let mut map = root_only();
    add_committed(&mut map, "1", Polarity::Objection, "Kept");
    let nodes = map.nodes().to_vec();
    let edges = map.edges().to_vec();

    let leaf = map.nodes()[1].id.clone();
    let draft = map.add_child(leaf.as_str(), Polarity::Support).unwrap();
    assert!(map.cancel_edit(draft.as_str()));

    assert_eq!(map.nodes(), nodes.as_slice());
    assert_eq!(map.edges(), edges.as_slice());
    assert!(!map.node(leaf.as_str()).unwrap().has_children);
}

#[test]
fn test_open_discussion_freezes_layout() {
    let mut map = ArgumentMap::starter(LayoutConfig::default()).unwrap();
    map.toggle_discussion("4");
    let before: Vec<PointI> = map.nodes().iter().map(|n| n.position).collect();

    // the larger editing box would otherwise push neighbours around
    assert!(map.begin_edit("3"));
    map.vote("5", Vote::Up);

    let after: Vec<PointI> = map.nodes().iter().map(|n| n.position).collect();
    assert_eq!(before, after);
}

#[test]
fn test_layout_catches_up_when_panel_closes() {
    let mut map = ArgumentMap::starter(LayoutConfig::default()).unwrap();
    map.toggle_discussion("1");
    map.begin_edit("3");
    assert!(map.close_all_discussions());

    let report = map.relayout();
    assert!(!report.skipped);
    map.check_invariants().unwrap();
}

#[test]
fn test_starter_snapshot() {
    let map = ArgumentMap::starter(LayoutConfig::default()).unwrap();
    map.check_invariants().unwrap();

    let json = MapOutput::from_map(&map).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["nodes"].as_array().unwrap().len(), 7);
    assert_eq!(value["nodes"][0]["polarity"], "root");
    assert_eq!(value["edges"][0]["routing"], "branching");
}

#[test]
fn test_identical_histories_give_identical_layouts() {
    let run = || {
        let mut map = ArgumentMap::starter(LayoutConfig::default()).unwrap();
        map.add_child("2", Polarity::Objection);
        map.add_child("1", Polarity::Support);
        map.add_child("7", Polarity::Support);
        map.relayout();
        map.nodes().to_vec()
    };
    assert_eq!(run(), run());
}
