//! End-to-end scenarios through the API facade, starting from an empty forest.

use folioapp::api::FolioApi;
use folioapp::ids::SequentialIds;
use folioapp::model::{DocumentId, Placement, Position};
use folioapp::navigation::{ActiveView, Route};
use folioapp::store::mem_backend::MemBackend;
use folioapp::store::snapshot::Snapshot;
use folioapp::store::{LoadOutcome, SnapshotStore};

const KEY: &str = "folio:v1";

fn empty_api() -> FolioApi<MemBackend> {
    let backend = MemBackend::with_blob(KEY, r#"{"documents": []}"#);
    let api = FolioApi::open(SnapshotStore::with_backend(backend, KEY))
        .unwrap()
        .with_ids(SequentialIds::new("d"));
    assert_eq!(api.load_outcome(), &LoadOutcome::Loaded);
    assert_eq!(api.forest().live_count(), 0);
    api
}

fn create(api: &mut FolioApi<MemBackend>, title: &str, parent: Option<&str>) -> String {
    let result = api.create_document(title, parent, None).unwrap();
    result.first_id().unwrap().to_string()
}

fn children(api: &FolioApi<MemBackend>, parent: Option<&str>) -> Vec<(String, f64)> {
    api.children_of(parent)
        .iter()
        .map(|d| (d.title.clone(), d.order))
        .collect()
}

fn saved(api: &FolioApi<MemBackend>) -> Snapshot {
    let blob = api.store().backend().blob(KEY).unwrap();
    Snapshot::from_json(&blob).unwrap()
}

#[test]
fn insert_after_sibling_then_normalize() {
    let mut api = empty_api();
    let a = create(&mut api, "A", None);
    api.create_document("B", None, Some(&a)).unwrap();

    assert_eq!(
        children(&api, None),
        vec![("A".to_string(), 0.0), ("B".to_string(), 1.0)]
    );
}

#[test]
fn insert_after_sibling_lands_between() {
    let mut api = empty_api();
    let a = create(&mut api, "A", None);
    create(&mut api, "C", None);
    api.create_document("B", None, Some(&a)).unwrap();

    let titles: Vec<String> = children(&api, None).into_iter().map(|(t, _)| t).collect();
    assert_eq!(titles, vec!["A", "B", "C"]);
}

#[test]
fn archive_moves_whole_subtree_to_trash() {
    let mut api = empty_api();
    let p = create(&mut api, "P", None);
    let c1 = create(&mut api, "C1", Some(&p));
    let c2 = create(&mut api, "C2", Some(&p));

    let result = api.archive_document(&p).unwrap();
    assert_eq!(result.affected_documents.len(), 3);

    for id in [&p, &c1, &c2] {
        assert!(api.get(id).is_none());
        assert!(api.forest().is_trashed(id));
    }
    let forest = api.forest();
    assert_eq!(forest.find_trashed(&p).unwrap().original_parent_id, None);
    assert_eq!(
        forest.find_trashed(&c1).unwrap().original_parent_id,
        Some(DocumentId::from(p.as_str()))
    );
    assert_eq!(
        forest.find_trashed(&c2).unwrap().original_parent_id,
        Some(DocumentId::from(p.as_str()))
    );

    let snapshot = saved(&api);
    assert_eq!(snapshot.documents.map(|d| d.len()), Some(0));
    assert_eq!(snapshot.trash.len(), 3);
}

#[test]
fn restore_child_first_then_parent_reattaches() {
    let mut api = empty_api();
    let p = create(&mut api, "P", None);
    let c1 = create(&mut api, "C1", Some(&p));
    create(&mut api, "C2", Some(&p));
    api.archive_document(&p).unwrap();

    let result = api.restore_document(&c1).unwrap();
    assert!(!result.messages.is_empty());
    let orphan = api.get(&c1).unwrap();
    assert_eq!(orphan.parent_id, None);
    assert_eq!(
        orphan.placement,
        Placement::RestoredOrphan {
            original_parent_id: DocumentId::from(p.as_str())
        }
    );
    let snapshot = saved(&api);
    let record = &snapshot.documents.unwrap()[0];
    assert!(record.is_restored_orphan);
    assert_eq!(record.original_parent_id, Some(DocumentId::from(p.as_str())));

    api.restore_document(&p).unwrap();
    let parent = api.get(&p).unwrap();
    assert_eq!(parent.parent_id, None);
    let child = api.get(&c1).unwrap();
    assert_eq!(child.parent_id.as_deref(), Some(p.as_str()));
    assert_eq!(child.placement, Placement::Attached);

    // C2 was never restored and stays in the trash.
    assert_eq!(api.trash().len(), 1);
    assert_eq!(children(&api, None), vec![("P".to_string(), 0.0)]);
}

#[test]
fn parent_restored_below_its_moved_orphan_survives_reload() {
    let mut api = empty_api();
    let a = create(&mut api, "A", None);
    let p = create(&mut api, "P", Some(&a));
    let c = create(&mut api, "C", Some(&p));
    api.archive_document(&p).unwrap();
    api.restore_document(&c).unwrap();

    let result = api.move_document(&a, &c, Position::Inside).unwrap();
    assert!(!result.is_noop());
    api.restore_document(&p).unwrap();

    assert_eq!(api.get(&p).unwrap().parent_id.as_deref(), Some(a.as_str()));
    assert_eq!(api.get(&a).unwrap().parent_id.as_deref(), Some(c.as_str()));
    assert_eq!(api.get(&c).unwrap().parent_id, None);
    assert_eq!(api.get(&c).unwrap().placement, Placement::Attached);
    assert_eq!(children(&api, None), vec![("C".to_string(), 0.0)]);
    assert!(api.forest().validate().is_ok());

    let blob = api.store().backend().blob(KEY).unwrap();
    let reopened = FolioApi::open(SnapshotStore::with_backend(
        MemBackend::with_blob(KEY, &blob),
        KEY,
    ))
    .unwrap();
    assert_eq!(reopened.load_outcome(), &LoadOutcome::Loaded);
    assert_eq!(reopened.forest().live_count(), 3);
    assert_eq!(reopened.breadcrumbs(&p).len(), 3);
}

#[test]
fn move_inside_own_descendant_is_a_noop() {
    let mut api = empty_api();
    let x = create(&mut api, "X", None);
    let mid = create(&mut api, "Mid", Some(&x));
    let y = create(&mut api, "Y", Some(&mid));
    let before = Snapshot::capture(api.forest(), api.view());

    let result = api.move_document(&x, &y, Position::Inside).unwrap();

    assert!(result.is_noop());
    assert_eq!(Snapshot::capture(api.forest(), api.view()), before);
}

#[test]
fn move_before_sibling_reorders_group() {
    let mut api = empty_api();
    let z = create(&mut api, "Z", None);
    let y = create(&mut api, "Y", Some(&z));
    create(&mut api, "M", Some(&z));
    let x = create(&mut api, "X", Some(&z));

    api.move_document(&x, &y, Position::Before).unwrap();

    assert_eq!(
        children(&api, Some(&z)),
        vec![
            ("X".to_string(), 0.0),
            ("Y".to_string(), 1.0),
            ("M".to_string(), 2.0)
        ]
    );
}

#[test]
fn breadcrumbs_and_active_view() {
    let mut api = empty_api();
    let a = create(&mut api, "Projects", None);
    let b = create(&mut api, "Folio", Some(&a));
    api.navigate(Route::to(b.as_str())).unwrap();

    let crumbs: Vec<&str> = api.breadcrumbs(&b).iter().map(|d| d.title.as_str()).collect();
    assert_eq!(crumbs, vec!["Projects", "Folio"]);
    assert!(matches!(api.active_view(), ActiveView::Found(doc) if doc.title == "Folio"));

    api.archive_document(&a).unwrap();
    assert!(matches!(api.active_view(), ActiveView::NotFound(_)));
    assert_eq!(saved(&api).active_id, Some(DocumentId::from(b.as_str())));
}

#[test]
fn tree_reflects_expansion() {
    let mut api = empty_api();
    let a = create(&mut api, "A", None);
    create(&mut api, "A1", Some(&a));
    api.set_expanded(&a, false).unwrap();

    let tree = api.tree();
    assert_eq!(tree.len(), 1);
    assert!(!tree[0].expanded);
    assert!(tree[0].has_children());

    assert!(api.toggle_expanded(&a).unwrap());
    assert!(api.tree()[0].expanded);
}
