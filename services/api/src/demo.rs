use crate::infra::Services;
use activity_tracker::accounts::{Registration, UserRepository, UserRole};
use activity_tracker::activities::{
    ActivityListQuery, ActivitySubmission, ActivityType, ProofDocument, ReviewDecision,
    ReviewRequest,
};
use activity_tracker::config::{BootstrapAdmin, ReviewConfig};
use activity_tracker::error::AppError;
use activity_tracker::programs::{Program, ProgramCatalog, ProgramCategory};
use activity_tracker::reports::to_csv;
use chrono::{Duration, Local};
use clap::Args;

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Limit output to one category (key such as SCIENCE or display value such as "Science")
    #[arg(long)]
    pub(crate) category: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Credits awarded to the approved activity in the walkthrough
    #[arg(long, default_value_t = 2.0)]
    pub(crate) credits: f64,
    /// Print the credit report as CSV instead of a table
    #[arg(long)]
    pub(crate) csv: bool,
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let catalog = ProgramCatalog::standard();

    match args.category.as_deref() {
        Some(raw) => match ProgramCategory::resolve(raw) {
            Some(category) => render_category(category, catalog.programs_in(category)),
            None => println!("No programs found for category '{raw}'."),
        },
        None => {
            for entry in catalog.categories() {
                if let Some(category) = ProgramCategory::from_key(entry.key) {
                    render_category(category, catalog.programs_in(category));
                }
            }
        }
    }

    Ok(())
}

fn render_category(category: ProgramCategory, programs: &[Program]) {
    println!("\n{} [{}]", category.display_value(), category.key());
    for program in programs {
        let lateral = if program.lateral_entry {
            ", lateral entry"
        } else {
            ""
        };
        println!(
            "  - {} ({}; {} years{lateral})",
            program.degree_code, program.name, program.duration_years
        );
        if program.has_specializations() {
            println!("      {}", program.specializations.join(" | "));
        }
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let services = Services::in_memory(ReviewConfig::default());

    println!("Student activity tracker demo");
    let admin = services.accounts.bootstrap_admin(&BootstrapAdmin {
        name: "Demo Administrator".to_string(),
        email: "admin@demo.campus".to_string(),
    })?;
    println!("- bootstrap admin {} <{}>", admin.id, admin.email);

    let engineering = services.accounts.register(Registration {
        name: "Aarav Mehta".to_string(),
        email: "aarav.mehta@demo.campus".to_string(),
        role: UserRole::Student,
        program_category: Some("ENGINEERING".to_string()),
        program: Some("B.Tech".to_string()),
        specialization: Some("Robotics & Automation".to_string()),
        admission_year: Some(2023),
    })?;
    let science = services.accounts.register(Registration {
        name: "Diya Kapoor".to_string(),
        email: "diya.kapoor@demo.campus".to_string(),
        role: UserRole::Student,
        program_category: Some("Science".to_string()),
        program: Some("M.Sc".to_string()),
        specialization: Some("Data Science".to_string()),
        admission_year: Some(2024),
    })?;
    let reviewer = services.accounts.register(Registration {
        name: "Dr. Farhan Qureshi".to_string(),
        email: "farhan.qureshi@demo.campus".to_string(),
        role: UserRole::Faculty,
        program_category: Some("ENGINEERING".to_string()),
        program: None,
        specialization: None,
        admission_year: None,
    })?;
    println!(
        "- registered {} ({}), {} ({}), faculty {} ({})",
        engineering.name,
        category_label(engineering.program_category),
        science.name,
        category_label(science.program_category),
        reviewer.name,
        category_label(reviewer.program_category),
    );

    let today = Local::now().date_naive();
    let robotics = services.activities.submit(
        &engineering.id,
        submission(
            "National robotics challenge",
            ActivityType::Competition,
            today - Duration::days(12),
            "robotics-certificate.pdf",
        ),
    )?;
    let workshop = services.activities.submit(
        &engineering.id,
        submission(
            "Embedded Rust workshop",
            ActivityType::Workshop,
            today - Duration::days(5),
            "workshop-badge.png",
        ),
    )?;
    let seminar = services.activities.submit(
        &science.id,
        submission(
            "Statistics seminar",
            ActivityType::Seminar,
            today - Duration::days(3),
            "seminar-attendance.jpg",
        ),
    )?;
    println!(
        "- submitted {}, {}, {}",
        robotics.id, workshop.id, seminar.id
    );

    let visible = services
        .activities
        .list(&reviewer.id, &ActivityListQuery::default())?;
    println!(
        "- {} sees {} activities in their category",
        reviewer.name,
        visible.len()
    );

    services.activities.review(
        &reviewer.id,
        &robotics.id,
        &ReviewRequest {
            decision: ReviewDecision::Approved,
            remarks: Some("Finalist certificate verified".to_string()),
            credits: Some(args.credits),
        },
    )?;
    services.activities.review(
        &reviewer.id,
        &workshop.id,
        &ReviewRequest {
            decision: ReviewDecision::Rejected,
            remarks: Some("Badge does not name the participant".to_string()),
            credits: None,
        },
    )?;
    match services.activities.review(
        &reviewer.id,
        &seminar.id,
        &ReviewRequest {
            decision: ReviewDecision::Approved,
            remarks: None,
            credits: Some(1.0),
        },
    ) {
        Ok(_) => println!("- unexpected: cross-category review succeeded"),
        Err(err) => println!("- cross-category review refused: {err}"),
    }

    let report = services.reports.credit_report(&admin.id)?;
    if args.csv {
        match to_csv(&report) {
            Ok(csv) => print!("\n{csv}"),
            Err(err) => println!("\nCSV export failed: {err}"),
        }
    } else {
        println!("\nCredit report");
        for row in &report.rows {
            println!(
                "  {:<20} {:<26} approved {} pending {} rejected {} credits {:.1}",
                row.name,
                category_label(row.program_category),
                row.approved,
                row.pending,
                row.rejected,
                row.total_credits
            );
        }
        println!(
            "  total: {} students, {:.1} credits",
            report.totals.students, report.totals.total_credits
        );
    }

    let summary = services.accounts.delete(&admin.id, &reviewer.id)?;
    println!(
        "\nRemoved {}; {} reviewed activities kept with attribution notes",
        reviewer.name, summary.detached_activities
    );
    let remaining = services.users.fetch(&reviewer.id);
    if let Ok(None) = remaining {
        println!("- reviewer account no longer present");
    }

    Ok(())
}

fn submission(
    title: &str,
    activity_type: ActivityType,
    date: chrono::NaiveDate,
    file_name: &str,
) -> ActivitySubmission {
    ActivitySubmission {
        title: title.to_string(),
        activity_type,
        description: format!("{} entry for the demo walkthrough", activity_type.label()),
        date,
        duration: "1 day".to_string(),
        organizer: "Demo Campus".to_string(),
        proof_document: ProofDocument {
            file_name: file_name.to_string(),
            storage_key: format!("demo/proofs/{file_name}"),
        },
    }
}

fn category_label(category: Option<ProgramCategory>) -> &'static str {
    category.map_or("no category", |category| category.display_value())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_walkthrough_completes() {
        run_demo(DemoArgs {
            credits: 2.5,
            csv: true,
        })
        .expect("demo succeeds");
    }

    #[test]
    fn catalog_accepts_unknown_categories() {
        run_catalog(CatalogArgs {
            category: Some("Astrology".to_string()),
        })
        .expect("catalog is permissive");
        run_catalog(CatalogArgs::default()).expect("full catalog");
    }
}
