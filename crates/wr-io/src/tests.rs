//! Unit tests for wr-io.

#[cfg(test)]
mod helpers {
    use wr_core::{Vec3, Wall, WallId};

    /// 10 ft × 8 ft wall along +X, 6" thick.  With 16" framing the bays are
    /// [0.0625, 1.2708], [1.3958, 2.6042], … [6.7292, 7.9375], … [9.3958, 9.9375].
    pub fn wall() -> Wall {
        Wall::from_baseline(
            WallId(1),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            8.0,
            0.5,
        )
        .unwrap()
    }

    pub const CONNECTORS: &str = "\
id,owner_id,x,y,z,dx,dy,dz,domain,system_type,radius
1,12,4.6,1.0,3.0,0,0,-1,piping,sanitary,0.05
2,,2.0,-1.0,6.5,0,0,1,,vent,0.0625
3,12,5.0,10.0,3.0,0,0,-1,piping,sanitary,0.05
4,13,7.0,1.0,3.0,0,0,-1,piping,sanitary,1.0
";

    pub fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::{Cursor, Write};

    use wr_core::{ConnectorId, Domain, OwnerId, SystemType, Vec3};

    use super::helpers::CONNECTORS;
    use crate::{load_connectors_csv, load_connectors_reader, IoError};

    #[test]
    fn reads_rows_in_file_order() {
        let connectors = load_connectors_reader(Cursor::new(CONNECTORS)).unwrap();
        assert_eq!(connectors.len(), 4);
        let ids: Vec<_> = connectors.iter().map(|c| c.id).collect();
        assert_eq!(ids, [ConnectorId(1), ConnectorId(2), ConnectorId(3), ConnectorId(4)]);

        let drain = &connectors[0];
        assert_eq!(drain.owner_id, OwnerId(12));
        assert_eq!(drain.origin, Vec3::new(4.6, 1.0, 3.0));
        assert_eq!(drain.direction, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(drain.domain, Domain::Piping);
        assert_eq!(drain.system_type, SystemType::Sanitary);
        assert_eq!(drain.radius, 0.05);
    }

    #[test]
    fn empty_optional_columns() {
        let connectors = load_connectors_reader(Cursor::new(CONNECTORS)).unwrap();
        let vent = &connectors[1];
        assert_eq!(vent.owner_id, OwnerId::INVALID);
        assert_eq!(vent.domain, Domain::Piping);
        assert_eq!(vent.system_type, SystemType::Vent);
    }

    #[test]
    fn hyphenated_system_type() {
        let csv = "id,owner_id,x,y,z,dx,dy,dz,domain,system_type,radius\n\
                   7,1,0,0,0,0,-1,0,hvac,supply-hot,0.03\n";
        let connectors = load_connectors_reader(Cursor::new(csv)).unwrap();
        assert_eq!(connectors[0].system_type, SystemType::SupplyHot);
        assert_eq!(connectors[0].domain, Domain::Hvac);
    }

    #[test]
    fn unknown_system_type_names_the_row() {
        let csv = "id,owner_id,x,y,z,dx,dy,dz,domain,system_type,radius\n\
                   1,1,0,0,0,0,0,-1,piping,sanitary,0.05\n\
                   2,1,0,0,0,0,0,-1,piping,storm,0.05\n";
        let err = load_connectors_reader(Cursor::new(csv)).unwrap_err();
        match err {
            IoError::Parse { row, reason } => {
                assert_eq!(row, 2);
                assert!(reason.contains("storm"), "{reason}");
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn negative_radius_rejected() {
        let csv = "id,owner_id,x,y,z,dx,dy,dz,domain,system_type,radius\n\
                   1,1,0,0,0,0,0,-1,piping,sanitary,-0.05\n";
        let err = load_connectors_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, IoError::Parse { row: 1, .. }));
    }

    #[test]
    fn non_finite_coordinates_rejected() {
        let csv = "id,owner_id,x,y,z,dx,dy,dz,domain,system_type,radius\n\
                   1,1,NaN,0,0,0,0,-1,piping,sanitary,0.05\n";
        let err = load_connectors_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, IoError::Parse { row: 1, .. }));
    }

    #[test]
    fn malformed_number_is_csv_error() {
        let csv = "id,owner_id,x,y,z,dx,dy,dz,domain,system_type,radius\n\
                   1,1,abc,0,0,0,0,-1,piping,sanitary,0.05\n";
        let err = load_connectors_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, IoError::Csv(_)));
    }

    #[test]
    fn from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("connectors.csv");
        std::fs::File::create(&path).unwrap().write_all(CONNECTORS.as_bytes()).unwrap();
        assert_eq!(load_connectors_csv(&path).unwrap().len(), 4);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_connectors_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }
}

// ── CSV writer ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_writer {
    use crate::csv::{CAVITY_HEADER, ROUTE_HEADER, ROUTE_POINT_HEADER};
    use crate::{CavityRow, CsvWriter, OutputWriter, RoutePointRow, RouteRow};

    fn header(path: &std::path::Path) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn creates_files_with_headers() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(header(&dir.path().join("cavities.csv")), CAVITY_HEADER);
        assert_eq!(header(&dir.path().join("routes.csv")), ROUTE_HEADER);
        assert_eq!(header(&dir.path().join("route_points.csv")), ROUTE_POINT_HEADER);
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn optional_fields_written_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_cavities(&[CavityRow {
            wall_id:     3,
            cavity_id:   0,
            u_left:      0.0625,
            u_right:     1.25,
            v_bottom:    0.0,
            v_top:       8.0,
            source_mode: "derived",
            kind:        "full",
        }])
        .unwrap();
        w.write_route(&RouteRow {
            connector_id:  9,
            wall_id:       3,
            system_type:   "sanitary",
            pipe_radius:   0.05,
            cavity_id:     None,
            status:        "unrouted",
            reason:        Some("no_cavity_at_entry"),
            entry_u:       1.0,
            entry_v:       2.0,
            exit_u:        None,
            exit_v:        None,
            exit_boundary: "bottom_plate",
            column_u:      None,
            half_width:    None,
            approach:      "down",
            jog:           false,
            length:        0.0,
        })
        .unwrap();
        w.write_route_points(&[RoutePointRow {
            connector_id: 9,
            seq:          0,
            u:            1.0,
            v:            2.0,
            x:            1.0,
            y:            0.0,
            z:            2.0,
        }])
        .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("routes.csv")).unwrap();
        let row = rdr.records().next().unwrap().unwrap();
        assert_eq!(&row[0], "9");
        assert_eq!(&row[4], "");
        assert_eq!(&row[5], "unrouted");
        assert_eq!(&row[6], "no_cavity_at_entry");
        assert_eq!(&row[9], "");
        assert_eq!(&row[15], "0");

        let mut rdr = csv::Reader::from_path(dir.path().join("cavities.csv")).unwrap();
        let row = rdr.records().next().unwrap().unwrap();
        assert_eq!(&row[6], "derived");
        assert_eq!(&row[7], "full");

        let rdr = csv::Reader::from_path(dir.path().join("route_points.csv")).unwrap();
        assert_eq!(rdr.into_records().count(), 1);
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer {
    use std::io::Cursor;

    use wr_core::ConnectorId;
    use wr_route::{RouteObserver, RoutePlanner, RoutingSummary, UnroutedReason};

    use super::helpers::{approx, wall, CONNECTORS};
    use crate::{
        load_connectors_reader, CavityRow, CsvWriter, IoError, IoResult, OutputWriter,
        RouteOutputObserver, RoutePointRow, RouteRow,
    };

    #[test]
    fn end_to_end_csv() {
        let dir = tempfile::tempdir().unwrap();
        let walls = [wall()];
        let connectors = load_connectors_reader(Cursor::new(CONNECTORS)).unwrap();

        let mut obs = RouteOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        let outcome = RoutePlanner::new(&walls, &connectors).run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        assert_eq!(outcome.unplaced, vec![ConnectorId(3)]);
        assert_eq!(outcome.summary.routed, 2);
        assert_eq!(outcome.summary.unrouted, 1);
        let narrow = outcome.route_for(ConnectorId(4)).unwrap();
        assert_eq!(narrow.status.reason(), Some(UnroutedReason::CavityTooNarrow));

        let rdr = csv::Reader::from_path(dir.path().join("cavities.csv")).unwrap();
        assert_eq!(rdr.into_records().count(), 8);

        let mut rdr = csv::Reader::from_path(dir.path().join("routes.csv")).unwrap();
        let rows: Vec<csv::StringRecord> = rdr.records().map(Result::unwrap).collect();
        let ids: Vec<&str> = rows.iter().map(|r| &r[0]).collect();
        assert_eq!(ids, ["1", "2", "4"]);

        // Drain straight down from (4.6, 3.0) in cavity 3.
        assert_eq!(&rows[0][4], "3");
        assert_eq!(&rows[0][5], "routed");
        assert_eq!(&rows[0][6], "");
        assert!(approx(rows[0][12].parse().unwrap(), 4.6));
        assert_eq!(&rows[0][11], "bottom_plate");
        assert!(approx(rows[0][16].parse().unwrap(), 3.0));

        assert_eq!(&rows[1][2], "vent");
        assert_eq!(&rows[1][11], "top_plate");
        assert!(approx(rows[1][10].parse().unwrap(), 8.0));

        assert_eq!(&rows[2][4], "5");
        assert_eq!(&rows[2][5], "unrouted");
        assert_eq!(&rows[2][6], "cavity_too_narrow");
        assert_eq!(&rows[2][9], "");

        let mut rdr = csv::Reader::from_path(dir.path().join("route_points.csv")).unwrap();
        let points: Vec<csv::StringRecord> = rdr.records().map(Result::unwrap).collect();
        assert_eq!(points.len(), 4);
        assert_eq!((&points[0][0], &points[0][1]), ("1", "0"));
        assert_eq!((&points[1][0], &points[1][1]), ("1", "1"));
        assert!(approx(points[1][6].parse().unwrap(), 0.0));
    }

    /// Fails every route write after the first.
    #[derive(Default)]
    struct FlakyWriter {
        routes:   usize,
        finished: bool,
    }

    impl OutputWriter for FlakyWriter {
        fn write_cavities(&mut self, _rows: &[CavityRow]) -> IoResult<()> {
            Ok(())
        }
        fn write_route(&mut self, _row: &RouteRow) -> IoResult<()> {
            self.routes += 1;
            if self.routes > 1 {
                return Err(IoError::Parse { row: self.routes, reason: "disk full".into() });
            }
            Ok(())
        }
        fn write_route_points(&mut self, _rows: &[RoutePointRow]) -> IoResult<()> {
            Ok(())
        }
        fn finish(&mut self) -> IoResult<()> {
            self.finished = true;
            Ok(())
        }
    }

    #[test]
    fn keeps_first_error_and_continues() {
        let walls = [wall()];
        let connectors = load_connectors_reader(Cursor::new(CONNECTORS)).unwrap();
        let mut obs = RouteOutputObserver::new(FlakyWriter::default());
        RoutePlanner::new(&walls, &connectors).run(&mut obs).unwrap();

        match obs.take_error() {
            Some(IoError::Parse { row, .. }) => assert_eq!(row, 2),
            other => panic!("expected stored error, got {other:?}"),
        }
        assert!(obs.take_error().is_none());

        let writer = obs.into_writer();
        assert_eq!(writer.routes, 3);
        assert!(writer.finished);
    }

    #[test]
    fn finish_hook_flushes() {
        let mut obs = RouteOutputObserver::new(FlakyWriter::default());
        obs.on_finish(&RoutingSummary::default());
        assert!(obs.into_writer().finished);
    }
}
