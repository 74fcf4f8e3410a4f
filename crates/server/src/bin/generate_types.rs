use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use ts_rs::TS;

#[derive(Parser, Debug)]
#[command(about = "Write the TypeScript bindings for the API types")]
struct Args {
    /// Output file
    #[arg(long, default_value = "shared/types.ts")]
    out: PathBuf,

    /// Exit non-zero if the file on disk is stale instead of rewriting it
    #[arg(long)]
    check: bool,
}

fn generate_types_content() -> String {
    let decls = [
        utils::response::ApiResponse::<()>::decl(),
        db::models::room::Room::decl(),
        db::models::room::StringList::decl(),
        db::models::room::RoomPayload::decl(),
        db::models::room::RoomFilter::decl(),
        db::models::customer::Customer::decl(),
        db::models::customer::CustomerWithBookingCount::decl(),
        db::models::customer::UpdateCustomer::decl(),
        db::models::booking::BookingStatus::decl(),
        db::models::booking::Booking::decl(),
        db::models::booking::BookingWithDetails::decl(),
        db::models::booking::CreateBooking::decl(),
        db::models::booking::UpdateBooking::decl(),
        services::services::booking::AvailabilityRequest::decl(),
        services::services::booking::Availability::decl(),
        services::services::auth::LoginRequest::decl(),
        services::services::auth::AdminSession::decl(),
        services::services::dashboard::MonthlyBookings::decl(),
        services::services::dashboard::MonthlyRevenue::decl(),
        services::services::dashboard::DashboardStats::decl(),
        services::services::report::ReportBookingRow::decl(),
        services::services::report::DailyBookings::decl(),
        services::services::report::MonthlyReport::decl(),
        services::services::content::GalleryCategory::decl(),
        services::services::content::GalleryImage::decl(),
        services::services::content::Activity::decl(),
    ];

    let body = decls
        .into_iter()
        .map(|decl| format!("export {decl}"))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "// This file was generated by `generate_types`. Do not edit it by hand.\n\n{body}\n"
    )
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let content = generate_types_content();

    if args.check {
        let current = fs::read_to_string(&args.out).unwrap_or_default();
        if current != content {
            anyhow::bail!(
                "{} is out of date, run generate_types to refresh it",
                args.out.display()
            );
        }
        println!("{} is up to date", args.out.display());
        return Ok(());
    }

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&args.out, content)
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    println!("Wrote {}", args.out.display());
    Ok(())
}
