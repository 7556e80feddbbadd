//! `ledger assignments` handlers.

use crate::args::AddAssignmentArgs;
use crate::commands::{lines, Out};
use crate::model::{Assignment, NewAssignment, YearFilter};
use crate::{Config, Result};

pub async fn list_assignments(config: Config, year: YearFilter) -> Result<Out<Vec<Assignment>>> {
    let store = config.store().await?;
    let assignments = store.assignments(year);
    let heading = format!("{} assignment(s) for {year}", assignments.len());
    let message = lines(heading, &assignments, |a| {
        format!(
            "#{} {} {}: {} [{}]",
            a.id(),
            a.year(),
            a.member(),
            a.task(),
            a.status()
        )
    });
    Ok(Out::new(message, assignments))
}

pub async fn add_assignment(config: Config, args: AddAssignmentArgs) -> Result<Out<Assignment>> {
    let mut store = config.store().await?;
    let assignment = store
        .add_assignment(NewAssignment::new(args.year, args.member, args.task))
        .await?;
    Ok(Out::new(
        format!(
            "Assigned '{}' to {} for {} (#{})",
            assignment.task(),
            assignment.member(),
            assignment.year(),
            assignment.id()
        ),
        assignment,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AssignmentStatus;
    use crate::test::TestEnv;

    fn args(year: i32, member: &str, task: &str) -> AddAssignmentArgs {
        AddAssignmentArgs {
            year,
            member: member.to_string(),
            task: task.to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_and_list_assignments() {
        let env = TestEnv::empty().await;
        let out = add_assignment(env.config(), args(2025, "Priya", "Flowers"))
            .await
            .unwrap();
        assert_eq!(out.message(), "Assigned 'Flowers' to Priya for 2025 (#1)");
        assert_eq!(out.structure().unwrap().status(), AssignmentStatus::Pending);
        add_assignment(env.config(), args(2024, "Arjun", "Parking"))
            .await
            .unwrap();

        let out = list_assignments(env.config(), YearFilter::Year(2025))
            .await
            .unwrap();
        assert_eq!(
            out.message(),
            "1 assignment(s) for 2025\n  #1 2025 Priya: Flowers [Pending]"
        );

        let out = list_assignments(env.config(), YearFilter::All)
            .await
            .unwrap();
        assert_eq!(out.structure().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_add_assignment_blank_task() {
        let env = TestEnv::empty().await;
        assert!(add_assignment(env.config(), args(2025, "Priya", ""))
            .await
            .is_err());
    }
}
