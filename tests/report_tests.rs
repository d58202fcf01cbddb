use allocation_report::{
    AllocationError, AllocationReport, AllocationTable, Assignment, ReportConfig, ReportError,
    ReportInterval, Resource, Schedule, ScheduleMetadata, Task,
};
use chrono::NaiveDate;

const EPSILON: f64 = 1e-9;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn february() -> ReportInterval {
    ReportInterval::new(d(2025, 2, 3), d(2025, 3, 3)).unwrap()
}

fn resources() -> Vec<Resource> {
    vec![
        Resource::new("ann", "Ann").with_tag("ClarityRID", "R1"),
        Resource::new("bob", "Bob").with_tag("ClarityRID", "R2"),
        Resource::new("intern", "Intern"),
    ]
}

fn tasks() -> Vec<Task> {
    vec![
        Task::new("design", "Design")
            .with_tag("ClarityPID", "P1")
            .with_tag("ClarityPName", "Alpha")
            .with_assignment(Assignment::new("ann", d(2025, 2, 3), d(2025, 2, 10))),
        Task::new("build", "Build")
            .with_tag("ClarityPID", "P2")
            .with_tag("ClarityPName", "Beta")
            .with_assignment(Assignment::new("ann", d(2025, 2, 11), d(2025, 2, 21))),
        Task::new("support", "Support")
            .with_tag("ClarityPID", "P1")
            .with_tag("ClarityPName", "Alpha")
            .with_assignment(Assignment::new("bob", d(2025, 2, 3), d(2025, 2, 28)).with_load(1.1))
            .with_assignment(Assignment::new("intern", d(2025, 2, 3), d(2025, 2, 28))),
        Task::new("admin", "Administration")
            .with_assignment(Assignment::new("bob", d(2025, 1, 6), d(2025, 1, 31))),
    ]
}

fn build_schedule(resources: Vec<Resource>, tasks: Vec<Task>) -> Schedule {
    let mut metadata = ScheduleMetadata::default();
    metadata.project_name = "Portfolio".into();
    metadata.now = d(2025, 3, 4);
    let mut schedule = Schedule::new_with_metadata(metadata);
    for resource in resources {
        schedule.upsert_resource(resource);
    }
    for task in tasks {
        schedule.upsert_task(task);
    }
    schedule
}

fn generate(schedule: &Schedule) -> AllocationTable {
    let config = ReportConfig::new(february()).with_idle_bucket("VAC", "Vacation");
    AllocationReport::new(schedule, &config).generate().unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn fractions_of_the_reference_month() {
    let table = generate(&build_schedule(resources(), tasks()));

    assert_eq!(table.working_days(), 20.0);
    assert_close(table.fraction("P1", "R1"), 0.30);
    assert_close(table.fraction("P2", "R1"), 0.45);
    assert_close(table.fraction("VAC", "R1"), 0.25);
    assert_close(table.fraction("P1", "R2"), 1.0);
    assert_close(table.fraction("P2", "R2"), 0.0);
    assert_close(table.fraction("VAC", "R2"), 0.0);

    assert_close(table.bucket_total("P1"), 1.30);
    assert_close(table.grand_total(), 2.0);
}

#[test]
fn every_resource_sums_to_one_with_idle_bucket() {
    let table = generate(&build_schedule(resources(), tasks()));
    for resource_id in table.resource_ids() {
        assert_close(table.resource_total(resource_id), 1.0);
    }
}

#[test]
fn buckets_and_resources_iterate_sorted() {
    let table = generate(&build_schedule(resources(), tasks()));
    let buckets: Vec<&str> = table.bucket_ids().collect();
    assert_eq!(buckets, vec!["P1", "P2", "VAC"]);
    let resource_ids: Vec<&str> = table.resource_ids().collect();
    assert_eq!(resource_ids, vec!["R1", "R2"]);
}

#[test]
fn declaration_order_does_not_change_the_result() {
    let forward = generate(&build_schedule(resources(), tasks()));
    let mut reversed_resources = resources();
    reversed_resources.reverse();
    let mut reversed_tasks = tasks();
    reversed_tasks.reverse();
    let backward = generate(&build_schedule(reversed_resources, reversed_tasks));

    for bucket_id in forward.bucket_ids() {
        for resource_id in forward.resource_ids() {
            assert_close(
                backward.fraction(bucket_id, resource_id),
                forward.fraction(bucket_id, resource_id),
            );
        }
    }
}

#[test]
fn without_idle_bucket_totals_reflect_bookings_only() {
    let schedule = build_schedule(resources(), tasks());
    let config = ReportConfig::new(february());
    let table = AllocationReport::new(&schedule, &config).generate().unwrap();

    assert!(table.bucket("VAC").is_none());
    assert_close(table.resource_total("R1"), 0.75);
    assert_close(table.resource_total("R2"), 1.0);
}

#[test]
fn unknown_ids_have_zero_fraction() {
    let table = generate(&build_schedule(resources(), tasks()));
    assert_eq!(table.fraction("P7", "R1"), 0.0);
    assert_eq!(table.fraction("P1", "R9"), 0.0);
}

#[test]
fn bookings_outside_the_interval_are_ignored() {
    let table = generate(&build_schedule(resources(), tasks()));
    let bob = table.capacity("R2").unwrap();
    assert_close(bob.allocated_effort, 22.0);
}

#[test]
fn other_scenario_is_reported_separately() {
    let mut tasks = tasks();
    tasks.push(
        Task::new("plan-b", "Plan B")
            .with_tag("ClarityPID", "P3")
            .with_tag("ClarityPName", "Gamma")
            .with_assignment(
                Assignment::new("ann", d(2025, 2, 3), d(2025, 2, 28)).in_scenario(1),
            ),
    );
    let schedule = build_schedule(resources(), tasks);

    let table = generate(&schedule);
    assert!(table.bucket("P3").is_none());

    let mut config = ReportConfig::new(february()).with_idle_bucket("VAC", "Vacation");
    config.scenario = 1;
    let table = AllocationReport::new(&schedule, &config).generate().unwrap();
    let ids: Vec<&str> = table.bucket_ids().collect();
    assert_eq!(ids, vec!["P3", "VAC"]);
    assert_close(table.fraction("P3", "R1"), 1.0);
    assert_close(table.fraction("VAC", "R2"), 1.0);
}

#[test]
fn no_tagged_resources_fails() {
    let untagged = vec![Resource::new("ann", "Ann"), Resource::new("bob", "Bob")];
    let schedule = build_schedule(untagged, Vec::new());
    let config = ReportConfig::new(february());
    let err = AllocationReport::new(&schedule, &config)
        .generate()
        .unwrap_err();
    assert!(matches!(
        err,
        ReportError::Allocation(AllocationError::NoEligibleResources { .. })
    ));
}

#[test]
fn invalid_interval_fails_before_any_pass() {
    let schedule = build_schedule(resources(), tasks());
    let mut config = ReportConfig::new(february());
    config.end = config.start;
    let err = AllocationReport::new(&schedule, &config)
        .generate()
        .unwrap_err();
    assert!(matches!(err, ReportError::Config(_)));
}

#[test]
fn large_hierarchical_schedule_is_reported() {
    let resources: Vec<Resource> = (0..50)
        .map(|r| {
            Resource::new(format!("r{r}"), format!("Res {r}"))
                .with_tag("ClarityRID", format!("R{r:02}"))
        })
        .collect();
    let mut tasks: Vec<Task> = (0..30)
        .map(|g| Task::new(format!("grp{g}"), format!("Group {g}")))
        .collect();
    for i in 0..3000 {
        let project = i % 20;
        tasks.push(
            Task::new(format!("grp{}.t{i}", i % 30), format!("Task {i}"))
                .with_parent(format!("grp{}", i % 30))
                .with_tag("ClarityPID", format!("P{project:02}"))
                .with_tag("ClarityPName", format!("Project {project}"))
                .with_assignment(
                    Assignment::new(format!("r{}", i % 50), d(2025, 2, 3), d(2025, 2, 3))
                        .with_load(0.01),
                ),
        );
    }
    let table = generate(&build_schedule(resources, tasks));

    assert_eq!(table.resource_ids().count(), 50);
    assert_eq!(table.bucket_ids().count(), 21);
    for resource_id in table.resource_ids() {
        assert_close(table.resource_total(resource_id), 1.0);
    }
    // Tasks 0, 100, .., 2900 book R00 onto P00.
    assert_close(table.fraction("P00", "R00"), 0.3 / 20.0);
    assert!(table.bucket("P01").unwrap().sum("R00").is_none());
}
