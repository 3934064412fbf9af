//! Conversions between in-memory tables and Arrow record batches.

use super::column::CoordinateColumn;
use super::trajectory::{Frame, FrameMeta, TrajectoryTable};
use crate::features::FeatureTable;
use crate::segment::SegmentedTable;
use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use pp_common::{Checkpoint, Error, PitchId, PitcherId, Result, ScheduleId, Side};
use pp_math::{Axis, Point3};
use pp_store::columns::{bool_column, f64_column, i64_column, string_column};
use pp_store::schema::{
    frame_id_fields, BATTING_SIDE, PITCHER_ID, PITCH_ID, SCHEDULE_ID, THROWING_SIDE, TIME,
};
use pp_store::StoreError;
use std::sync::Arc;

fn batch(fields: Vec<Field>, columns: Vec<ArrayRef>) -> Result<RecordBatch> {
    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
        .map_err(|e| StoreError::from(e).into())
}

fn frame_columns(table: &TrajectoryTable) -> (Vec<Field>, Vec<ArrayRef>) {
    let frames = table.frames();
    let mut fields = frame_id_fields();
    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(
            frames.iter().map(|f| f.meta.pitch_id.0),
        )),
        Arc::new(Int64Array::from_iter_values(
            frames.iter().map(|f| f.meta.schedule_id.0),
        )),
        Arc::new(Int64Array::from_iter_values(
            frames.iter().map(|f| f.meta.pitcher_id.0),
        )),
        Arc::new(StringArray::from_iter_values(
            frames.iter().map(|f| f.meta.batting_side.code()),
        )),
        Arc::new(StringArray::from_iter_values(
            frames.iter().map(|f| f.meta.throwing_side.code()),
        )),
        Arc::new(Float64Array::from_iter_values(frames.iter().map(|f| f.time))),
    ];
    for (j, joint) in table.joints().iter().enumerate() {
        for axis in Axis::ALL {
            fields.push(Field::new(
                CoordinateColumn::new(joint.as_str(), axis).to_string(),
                DataType::Float64,
                false,
            ));
            columns.push(Arc::new(Float64Array::from_iter_values(
                frames.iter().map(|f| f.positions[j].component(axis)),
            )));
        }
    }
    (fields, columns)
}

/// Wide per-frame batch without flag columns.
pub fn trajectory_to_batch(table: &TrajectoryTable) -> Result<RecordBatch> {
    let (fields, columns) = frame_columns(table);
    batch(fields, columns)
}

/// Wide per-frame batch including one boolean column per checkpoint flag.
pub fn segmented_to_batch(segmented: &SegmentedTable) -> Result<RecordBatch> {
    let table = segmented.as_table();
    let (mut fields, mut columns) = frame_columns(table);
    for cp in Checkpoint::ALL {
        fields.push(Field::new(cp.flag_column(), DataType::Boolean, false));
        columns.push(Arc::new(BooleanArray::from(
            table
                .frames()
                .iter()
                .map(|f| f.marks.get(cp))
                .collect::<Vec<_>>(),
        )));
    }
    batch(fields, columns)
}

/// Joints with all three coordinate columns, in schema order.
fn joint_columns(schema: &Schema) -> Vec<String> {
    let mut joints: Vec<String> = Vec::new();
    for field in schema.fields() {
        let Ok(col) = field.name().parse::<CoordinateColumn>() else {
            continue;
        };
        if joints.contains(&col.joint) {
            continue;
        }
        let complete = CoordinateColumn::names_for(&col.joint)
            .iter()
            .all(|name| schema.field_with_name(name).is_ok());
        if complete {
            joints.push(col.joint);
        }
    }
    joints
}

fn parse_sides(values: Vec<String>, column: &str) -> Result<Vec<Side>> {
    values
        .iter()
        .enumerate()
        .map(|(row, v)| {
            v.parse()
                .map_err(|_| Error::Schema(format!("row {row}: {column} {v:?} is not L or R")))
        })
        .collect()
}

/// Read a wide table back. Flag columns are honoured when present.
pub fn trajectory_from_batches(batches: &[RecordBatch]) -> Result<TrajectoryTable> {
    let Some(first) = batches.first() else {
        return TrajectoryTable::new(Vec::new(), Vec::new());
    };
    let joints = joint_columns(first.schema().as_ref());
    let mut frames = Vec::new();

    for b in batches {
        let pitch = i64_column(b, PITCH_ID)?;
        let schedule = i64_column(b, SCHEDULE_ID)?;
        let pitcher = i64_column(b, PITCHER_ID)?;
        let bats = parse_sides(string_column(b, BATTING_SIDE)?, BATTING_SIDE)?;
        let throws = parse_sides(string_column(b, THROWING_SIDE)?, THROWING_SIDE)?;
        let time = f64_column(b, TIME)?;

        let coords = joints
            .iter()
            .map(|j| {
                let [x, y, z] = CoordinateColumn::names_for(j);
                Ok([f64_column(b, &x)?, f64_column(b, &y)?, f64_column(b, &z)?])
            })
            .collect::<std::result::Result<Vec<_>, StoreError>>()?;

        let mut flags = Vec::new();
        for cp in Checkpoint::ALL {
            if b.column_by_name(cp.flag_column()).is_some() {
                flags.push((cp, bool_column(b, cp.flag_column())?));
            }
        }

        for row in 0..b.num_rows() {
            let meta = FrameMeta {
                pitch_id: PitchId(pitch[row]),
                schedule_id: ScheduleId(schedule[row]),
                pitcher_id: PitcherId(pitcher[row]),
                batting_side: bats[row],
                throwing_side: throws[row],
            };
            let positions = coords
                .iter()
                .map(|[x, y, z]| Point3::new(x[row], y[row], z[row]))
                .collect();
            let mut frame = Frame::new(meta, time[row], positions);
            for (cp, values) in &flags {
                frame.marks.set(*cp, values[row]);
            }
            frames.push(frame);
        }
    }
    TrajectoryTable::new(joints, frames)
}

/// One row per pitch: identifier columns then feature columns.
pub fn features_to_batch(features: &FeatureTable) -> Result<RecordBatch> {
    let rows = features.rows();
    let mut fields = vec![
        Field::new(PITCHER_ID, DataType::Int64, false),
        Field::new(SCHEDULE_ID, DataType::Int64, false),
        Field::new(PITCH_ID, DataType::Int64, false),
    ];
    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.pitcher_id.0))),
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.schedule_id.0))),
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.pitch_id.0))),
    ];
    for (i, name) in features.columns().iter().enumerate() {
        fields.push(Field::new(name.as_str(), DataType::Float64, false));
        columns.push(Arc::new(Float64Array::from_iter_values(
            rows.iter().map(|r| r.values[i]),
        )));
    }
    batch(fields, columns)
}
