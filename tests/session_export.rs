use std::fs;

use dcrm_ingest::ingestion::{IngestionOptions, ingest_from_path};
use dcrm_ingest::processing::RowRange;
use dcrm_ingest::session::Session;
use dcrm_ingest::types::RecordLayout;
use dcrm_ingest::units::{UnitCategory, UnitPreferences};

#[test]
fn edited_export_reads_back_with_metadata_and_edits() {
    let mut units = UnitPreferences::default();
    units.set_unit(UnitCategory::Travel, "cm");
    let mut session = Session::with_units(units);
    session
        .load_path("tests/fixtures/new_layout.csv", &IngestionOptions::default())
        .unwrap();
    assert_eq!(session.selected(), ["Coil Current 1".to_string()]);

    // 0.2 cm is 2 mm in base units.
    session.set_point("Contact Travel 1", 1, 0.2).unwrap();
    assert!(session.edits().unwrap().has_changes());

    let out = std::env::temp_dir().join(format!("dcrm_ingest_{}_edited.csv", std::process::id()));
    session.export_edited(fs::File::create(&out).unwrap()).unwrap();
    let reread = ingest_from_path(&out, &IngestionOptions::default()).unwrap();
    let _ = fs::remove_file(&out);

    let original = session.record().unwrap();
    assert_eq!(reread.layout, RecordLayout::WithMetadata);
    assert_eq!(reread.metadata, original.metadata);
    assert_eq!(reread.time, original.time);
    assert_eq!(reread.groups, original.groups);
    assert_eq!(reread.channel("Contact Travel 1").unwrap().values, vec![0.0, 2.0, 3.0]);
    assert_eq!(
        reread.channel("DCRM Res Ch1").unwrap().values,
        original.channel("DCRM Res Ch1").unwrap().values
    );
    // The loaded record itself is not edited.
    assert_eq!(original.channel("Contact Travel 1").unwrap().values, vec![0.0, 1.5, 3.0]);
}

#[test]
fn range_export_and_stats_follow_the_session_range() {
    let mut session = Session::new();
    session
        .load_path("tests/fixtures/legacy.csv", &IngestionOptions::default())
        .unwrap();
    session.set_range(RowRange::new(1, 2)).unwrap();

    let mut buf = Vec::new();
    session.export_range(&mut buf).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "Time,Contact Travel 1,Coil Current 1,Note\n0.001,0.5,0.2,0\n0.003,1.5,0,0\n"
    );

    let stats = session.stats().unwrap();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].channel, "Coil Current 1");
    assert_eq!(stats[0].count, 2);
    assert_eq!(stats[0].min, 0.0);
    assert_eq!(stats[0].max, 0.2);
}

#[test]
fn smoothing_only_touches_the_range_interior() {
    let mut session = Session::new();
    session
        .load_path("tests/fixtures/legacy.csv", &IngestionOptions::default())
        .unwrap();
    session.toggle_selected("Contact Travel 1").unwrap();
    session.toggle_selected("Coil Current 1").unwrap();
    session.set_range(RowRange::new(0, 2)).unwrap();
    session.smooth_selected().unwrap();

    let edited = session.edits().unwrap().values("Contact Travel 1").unwrap();
    // (0 + 0.5 + 1.5) / 3
    assert!((edited[1] - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(edited[0], 0.0);
    assert_eq!(edited[2], 1.5);
    assert_eq!(edited[3], 2.5);

    session.reset_edits().unwrap();
    assert_eq!(
        session.edits().unwrap().values("Contact Travel 1").unwrap(),
        &[0.0, 0.5, 1.5, 2.5]
    );
}
