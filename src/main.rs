//! Command-line front end for the SMS admin screens.

use clap::{Parser, Subcommand, ValueEnum};

use sms_admin::api::ApiClient;
use sms_admin::config::Config;
use sms_admin::controller::CrudController;
use sms_admin::models::{Classroom, Resource, Student, Subject, Teacher};
use sms_admin::screens::{ClassroomAllocations, StudentReport, SubjectAllocations};

#[derive(Parser)]
#[command(name = "sms-admin")]
#[command(about = "Admin client for the School Management System API", long_about = None)]
struct Cli {
    /// Override SMS_API_BASE_URL
    #[arg(long)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the records of one resource
    List { resource: ResourceKind },
    /// Show resolved allocations
    Allocations { kind: AllocationKind },
    /// Show one student's details
    Report { student_id: i64 },
    /// Delete one record
    Delete { resource: ResourceKind, id: i64 },
}

#[derive(Clone, Copy, ValueEnum)]
enum ResourceKind {
    Students,
    Teachers,
    Subjects,
    Classrooms,
}

#[derive(Clone, Copy, ValueEnum)]
enum AllocationKind {
    Subjects,
    Classrooms,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.api_base_url = base_url;
    }
    sms_admin::init_tracing(&config);

    tracing::info!("API base URL: {}", config.api_base_url);
    let api = ApiClient::new(&config)?;

    match cli.command {
        Commands::List { resource } => match resource {
            ResourceKind::Students => {
                list::<Student>(&api, &config, |s| {
                    format!("{}\t{}\t{}\t{}", s.student_id, s.full_name(), s.email_address, s.age)
                })
                .await?
            }
            ResourceKind::Teachers => {
                list::<Teacher>(&api, &config, |t| {
                    format!("{}\t{}\t{}", t.teacher_id, t.full_name(), t.email_address)
                })
                .await?
            }
            ResourceKind::Subjects => {
                list::<Subject>(&api, &config, |s| format!("{}\t{}", s.subject_id, s.subject_name))
                    .await?
            }
            ResourceKind::Classrooms => {
                list::<Classroom>(&api, &config, |c| {
                    format!("{}\t{}", c.classroom_id, c.classroom_name)
                })
                .await?
            }
        },
        Commands::Allocations { kind } => match kind {
            AllocationKind::Subjects => {
                let mut screen = SubjectAllocations::new(api, config.submit_policy);
                screen.load().await?;
                for row in screen.rows() {
                    println!(
                        "{}\t{}\t{}",
                        row.allocation_id,
                        row.left.full_name(),
                        row.right.subject_name
                    );
                }
            }
            AllocationKind::Classrooms => {
                let mut screen = ClassroomAllocations::new(api, config.submit_policy);
                screen.load().await?;
                for row in screen.rows() {
                    println!(
                        "{}\t{}\t{}",
                        row.allocation_id, row.left.classroom_name, row.right.subject_name
                    );
                }
            }
        },
        Commands::Report { student_id } => {
            let mut report = StudentReport::new(api);
            report.select(student_id).await?;
            if let Some(student) = report.details() {
                println!("{}", serde_json::to_string_pretty(student)?);
            }
        }
        Commands::Delete { resource, id } => match resource {
            ResourceKind::Students => delete::<Student>(&api, &config, id).await?,
            ResourceKind::Teachers => delete::<Teacher>(&api, &config, id).await?,
            ResourceKind::Subjects => delete::<Subject>(&api, &config, id).await?,
            ResourceKind::Classrooms => delete::<Classroom>(&api, &config, id).await?,
        },
    }

    Ok(())
}

async fn list<R: Resource>(
    api: &ApiClient,
    config: &Config,
    row: impl Fn(&R) -> String,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = CrudController::<R>::new(api.clone(), config.submit_policy);
    controller.load().await?;
    for record in controller.records() {
        println!("{}", row(record));
    }
    Ok(())
}

async fn delete<R: Resource>(
    api: &ApiClient,
    config: &Config,
    id: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = CrudController::<R>::new(api.clone(), config.submit_policy);
    controller.remove(id).await?;
    if let Some(notification) = controller.notifications().current() {
        println!("{}", notification.message);
    }
    Ok(())
}
