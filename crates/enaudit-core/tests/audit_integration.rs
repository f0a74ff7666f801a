//! End-to-end audit workflow: build a building, compute illumination and
//! load schedules per room, sign off, and round-trip the project file.

use enaudit_core::{
    aggregate_schedule, builtin_catalog, Building, BuildingStore, Config, LoadItemDraft,
    PanelParams, ProjectStore, RequirementTable, Room, RoomKind, SignaturePad, Stroke, Point,
};

#[test]
fn test_full_audit_workflow() {
    let config = Config::default();
    let defaults = config.lighting_defaults();
    let table = RequirementTable::default();
    let lamp = &builtin_catalog()[0];

    // Two floors, three rooms.
    let mut building = Building::new("Engineering Annex");
    let ground = building.add_floor(0, "Ground Floor");
    let second = building.add_floor(1, "Second Floor");
    let lobby = building
        .add_room(ground, Room::new(ground, "Lobby", RoomKind::Lobby, 10.0, 8.0, 4.0))
        .unwrap();
    let office = building
        .add_room(second, Room::new(second, "Dean's Office", RoomKind::Office, 6.0, 5.0, 3.0))
        .unwrap();
    let lab = building
        .add_room(second, Room::new(second, "Physics Lab", RoomKind::Laboratory, 12.0, 8.0, 3.5))
        .unwrap();
    let mut store = BuildingStore::new(building);
    assert_eq!(store.building.room_count(), 3);

    // Illumination for every room.
    for room_id in [lobby, office, lab] {
        let result = store
            .compute_room_illumination(room_id, lamp, &table, &defaults)
            .unwrap();
        assert!(result.actual_lamps as f64 >= result.theoretical_lamps);
        assert!(result.achieved_lux >= result.required_lux);
        assert!(result.power_density_w_m2 > 0.0);
    }

    // The lab needs more light than the lobby of similar scale.
    let lobby_lux = store.metrics(lobby).unwrap().illumination.as_ref().unwrap();
    let lab_lux = store.metrics(lab).unwrap().illumination.as_ref().unwrap();
    assert!(lab_lux.required_lux > lobby_lux.required_lux);

    // A load schedule for the office panel.
    let drafts = vec![
        LoadItemDraft::new("Lighting outlets", 10.0, 100.0, 1.0),
        LoadItemDraft::new("Air conditioner", 1.0, 5000.0, 0.8),
    ];
    let mut params = PanelParams::new(
        "LP-2A",
        config.electrical.voltage_v,
        config.electrical.power_factor,
    );
    params.room_id = Some(office);
    let schedule = aggregate_schedule(&drafts, &params).unwrap();
    assert_eq!(schedule.total_connected_load_w, 6000.0);
    assert_eq!(schedule.total_demand_load_w, 5000.0);
    assert!((schedule.current_a.unwrap() - 24.15).abs() < 0.01);
    store.add_load_schedule(office, schedule);

    // Sign-off.
    let mut pad = SignaturePad::new("E. Santos", "Lead Auditor");
    pad.add_stroke(Stroke::new(vec![
        Point { x: 0.0, y: 0.0 },
        Point { x: 40.0, y: 12.0 },
        Point { x: 80.0, y: 3.0 },
    ]));
    pad.set_comment("Audit results verified");
    let mut signatures = Vec::new();
    assert!(pad.save_with(|sig| signatures.push(sig)));
    assert_eq!(signatures.len(), 1);

    // Round-trip the project file.
    let dir = tempfile::tempdir().unwrap();
    let project = ProjectStore::at(dir.path().join("annex.json"));
    project.save(&store).unwrap();
    let loaded = project.load().unwrap();
    assert_eq!(loaded, store);
    assert_eq!(
        loaded.metrics(office).unwrap().load_schedules.len(),
        1
    );
}

#[test]
fn test_metrics_replaced_wholesale_on_recompute() {
    let defaults = Config::default().lighting_defaults();
    let table = RequirementTable::default();
    let catalog = builtin_catalog();

    let mut building = Building::new("B");
    let floor = building.add_floor(0, "Ground");
    let room = building
        .add_room(floor, Room::new(floor, "Office", RoomKind::Office, 5.0, 4.0, 3.0))
        .unwrap();
    let mut store = BuildingStore::new(building);

    let first = store
        .compute_room_illumination(room, &catalog[0], &table, &defaults)
        .unwrap();
    let second = store
        .compute_room_illumination(room, &catalog[1], &table, &defaults)
        .unwrap();
    assert_ne!(first.lamp_name, second.lamp_name);

    // Only the latest snapshot survives.
    let cached = store.metrics(room).unwrap().illumination.as_ref().unwrap();
    assert_eq!(cached, &second);
}
