use personnel_client::{Config, PersonnelApp, StateChange};

use tracing::{error, info};
use tracing_appender::rolling;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(api_url = %config.api_url(), "Personnel client starting...");

    let mut app = PersonnelApp::new(config)?;
    let mut changes = app.subscribe();

    // Initial load: wait for all three collections, or the first failure
    app.refresh_all();
    let (mut departments, mut employees, mut grades) = (false, false, false);
    while !(departments && employees && grades) {
        if !app.process_next().await {
            break;
        }
        while let Ok(change) = changes.try_recv() {
            match change {
                StateChange::Departments => departments = true,
                StateChange::Employees => employees = true,
                StateChange::SalaryGrades => grades = true,
                _ => {}
            }
        }
        if !app.error_message().is_empty() {
            error!(error = %app.error_message(), "Initial load failed");
            anyhow::bail!("could not load data: {}", app.error_message());
        }
    }

    print_summary(&app);
    Ok(())
}

fn print_summary(app: &PersonnelApp) {
    println!("Departments ({})", app.departments().len());
    for dept in app.departments() {
        let head = app
            .department_head(dept)
            .map(|e| e.full_name())
            .unwrap_or_else(|| "-".to_string());
        println!("  {:<32} head: {}", dept.name, head);
    }

    let active = app.employees().iter().filter(|e| e.active).count();
    println!("Employees ({}, {} active)", app.employees().len(), active);

    println!("Salary grades ({})", app.salary_grades().len());
    for grade in app.salary_grades() {
        println!("  {:<8} {:>12.2}  {}", grade.code, grade.base_salary, grade.description);
    }
}
