//! `ledger attendance` handlers.

use crate::args::{AddAttendanceArgs, UpdateAttendanceArgs};
use crate::commands::{lines, with_family, Out};
use crate::model::{
    AttendanceRecord, AttendanceSummary, AttendanceUpdate, NewAttendance, YearFilter,
};
use crate::{Config, Result};
use anyhow::bail;
use serde::Serialize;

/// The structured output of `ledger attendance list`.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceList {
    pub records: Vec<AttendanceRecord>,
    pub summary: AttendanceSummary,
}

pub async fn list_attendance(config: Config, year: YearFilter) -> Result<Out<AttendanceList>> {
    let store = config.store().await?;
    let records = store.attendance(year);
    let summary = store.attendance_summary(year);
    let heading = format!(
        "{} attendance record(s) for {year}: {} coming, {} not coming, {} people expected",
        summary.records(),
        summary.coming(),
        summary.not_coming(),
        summary.expected_pax()
    );
    let message = lines(heading, &records, |r| {
        format!(
            "#{} {} {} x{} [{}]",
            r.id(),
            r.year(),
            with_family(r.name(), r.family()),
            r.pax(),
            r.status()
        )
    });
    Ok(Out::new(message, AttendanceList { records, summary }))
}

pub async fn add_attendance(
    config: Config,
    args: AddAttendanceArgs,
) -> Result<Out<AttendanceRecord>> {
    let mut store = config.store().await?;
    let record = store
        .add_attendance(NewAttendance::new(
            args.year, args.name, args.family, args.pax,
        ))
        .await?;
    Ok(Out::new(
        format!(
            "Added {} for {} with {} people (#{})",
            record.name(),
            record.year(),
            record.pax(),
            record.id()
        ),
        record,
    ))
}

/// Changes the fields given in `args` on an existing attendance record.
///
/// # Errors
/// - Returns an error if there is no record with the given id.
/// - Returns an error if the ledger cannot be saved.
pub async fn update_attendance(
    config: Config,
    args: UpdateAttendanceArgs,
) -> Result<Out<AttendanceRecord>> {
    let mut store = config.store().await?;
    let update = AttendanceUpdate {
        status: args.status,
        pax: args.pax,
        family: args.family,
    };
    let unchanged = update.is_empty();
    let Some(record) = store.update_attendance(args.id, update).await? else {
        bail!("No attendance record with id {}", args.id)
    };
    let message = if unchanged {
        format!("Nothing to update for attendance record #{}", record.id())
    } else {
        format!(
            "Updated attendance record #{}: {} x{} [{}]",
            record.id(),
            with_family(record.name(), record.family()),
            record.pax(),
            record.status()
        )
    };
    Ok(Out::new(message, record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttendanceStatus, RecordId};
    use crate::test::TestEnv;

    fn add_args(name: &str, pax: u32) -> AddAttendanceArgs {
        AddAttendanceArgs {
            year: 2025,
            name: name.to_string(),
            family: String::new(),
            pax,
        }
    }

    fn update_args(id: u64) -> UpdateAttendanceArgs {
        UpdateAttendanceArgs {
            id: RecordId::new(id),
            status: None,
            pax: None,
            family: None,
        }
    }

    #[tokio::test]
    async fn test_attendance_flow() {
        let env = TestEnv::empty().await;
        add_attendance(env.config(), add_args("Ravi", 4)).await.unwrap();
        let out = add_attendance(env.config(), add_args("Meena", 2))
            .await
            .unwrap();
        assert_eq!(out.message(), "Added Meena for 2025 with 2 people (#2)");

        let out = update_attendance(
            env.config(),
            UpdateAttendanceArgs {
                status: Some(AttendanceStatus::NotComing),
                ..update_args(1)
            },
        )
        .await
        .unwrap();
        assert_eq!(
            out.message(),
            "Updated attendance record #1: Ravi x4 [Not Coming]"
        );

        let out = list_attendance(env.config(), YearFilter::Year(2025))
            .await
            .unwrap();
        let list = out.structure().unwrap();
        assert_eq!(list.records.len(), 2);
        assert_eq!(list.records[1].status(), AttendanceStatus::Coming);
        assert_eq!(list.summary.coming(), 1);
        assert_eq!(list.summary.not_coming(), 1);
        assert_eq!(list.summary.expected_pax(), 2);
        assert!(out
            .message()
            .starts_with("2 attendance record(s) for 2025: 1 coming, 1 not coming, 2 people"));
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let env = TestEnv::empty().await;
        let err = update_attendance(
            env.config(),
            UpdateAttendanceArgs {
                pax: Some(3),
                ..update_args(99)
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "No attendance record with id 99");
    }

    #[tokio::test]
    async fn test_update_with_nothing_to_change() {
        let env = TestEnv::empty().await;
        add_attendance(env.config(), add_args("Ravi", 4)).await.unwrap();
        let out = update_attendance(env.config(), update_args(1)).await.unwrap();
        assert_eq!(out.message(), "Nothing to update for attendance record #1");
        assert_eq!(out.structure().unwrap().pax(), 4);
    }
}
