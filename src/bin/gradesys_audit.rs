//! 离线数据一致性审计工具
//!
//! 扫描账号/资料/教师档案三张表的 1:1 一致性：
//! - 没有资料记录的账号（只报告，不自动修复）
//! - 教师角色但缺少教师档案的资料（--fix 时按资料中的工号补建）
//! - 教师档案存在但资料角色不是教师（只报告，角色归属需人工裁定）
//!
//! 用法：
//!   gradesys-audit <DATABASE_URL> [--fix]

use std::process::ExitCode;
use std::sync::Arc;

use rust_gradesystem_next::storage::{Storage, sea_orm_storage::SeaOrmStorage};
use tracing::{error, info, warn};

struct AuditArgs {
    database_url: String,
    fix: bool,
}

fn parse_args() -> Option<AuditArgs> {
    let mut database_url = None;
    let mut fix = false;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--fix" => fix = true,
            "--help" | "-h" => return None,
            _ if database_url.is_none() => database_url = Some(arg),
            _ => return None,
        }
    }

    // 未给出位置参数时退回环境变量
    let database_url = database_url.or_else(|| std::env::var("DATABASE_URL").ok())?;

    Some(AuditArgs { database_url, fix })
}

fn print_usage() {
    eprintln!("Usage: gradesys-audit <DATABASE_URL> [--fix]");
    eprintln!();
    eprintln!("Scans accounts, profiles and teacher records for consistency.");
    eprintln!("  --fix    create missing teacher records for teacher-role profiles");
    eprintln!();
    eprintln!("DATABASE_URL may also be provided via the environment.");
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        ))
        .init();

    let Some(args) = parse_args() else {
        print_usage();
        return ExitCode::from(2);
    };

    let storage: Arc<dyn Storage> =
        match SeaOrmStorage::new_with_url(&args.database_url, 1, 5).await {
            Ok(storage) => Arc::new(storage),
            Err(e) => {
                error!("Failed to open database: {}", e);
                return ExitCode::FAILURE;
            }
        };

    let mut findings = 0usize;

    // 1. 没有资料记录的账号
    match storage.find_accounts_without_profiles().await {
        Ok(accounts) if accounts.is_empty() => {
            info!("All accounts have a profile record");
        }
        Ok(accounts) => {
            findings += accounts.len();
            for account in &accounts {
                warn!(
                    "Account without profile: id={} username={}",
                    account.id, account.username
                );
            }
            // 资料缺失无法推断角色，不做自动修复
            warn!(
                "{} account(s) have no profile; assign roles manually",
                accounts.len()
            );
        }
        Err(e) => {
            error!("Audit of accounts failed: {}", e);
            return ExitCode::FAILURE;
        }
    }

    // 2. 教师角色但缺少教师档案的资料
    match storage.find_orphan_teacher_profiles().await {
        Ok(profiles) if profiles.is_empty() => {
            info!("All teacher-role profiles have a teacher record");
        }
        Ok(profiles) => {
            findings += profiles.len();
            for profile in &profiles {
                warn!(
                    "Teacher profile without teacher record: user_id={}",
                    profile.user_id
                );

                if !args.fix {
                    continue;
                }

                // 工号来自资料，缺失时无法补建
                let Some(teacher_id) = profile.teacher_id.as_deref() else {
                    warn!(
                        "Cannot repair user_id={}: profile has no teacher_id",
                        profile.user_id
                    );
                    continue;
                };

                match storage
                    .create_missing_teacher_record(profile.user_id, teacher_id)
                    .await
                {
                    Ok(teacher) => {
                        info!(
                            "Created teacher record for user_id={} (teacher_id={})",
                            profile.user_id, teacher.teacher_id
                        );
                    }
                    Err(e) => {
                        error!("Failed to repair user_id={}: {}", profile.user_id, e);
                    }
                }
            }
        }
        Err(e) => {
            error!("Audit of teacher profiles failed: {}", e);
            return ExitCode::FAILURE;
        }
    }

    // 3. 教师档案存在但资料角色不是教师
    match storage.find_misclassified_teacher_records().await {
        Ok(records) if records.is_empty() => {
            info!("All teacher records match a teacher-role profile");
        }
        Ok(records) => {
            findings += records.len();
            for record in &records {
                warn!(
                    "Teacher record without teacher-role profile: user_id={} teacher_id={}",
                    record.user_id, record.teacher_id
                );
            }
            // 档案多余还是角色填错无法自动判断，不做修复
            warn!(
                "{} teacher record(s) have a non-teacher profile; resolve manually",
                records.len()
            );
        }
        Err(e) => {
            error!("Audit of teacher records failed: {}", e);
            return ExitCode::FAILURE;
        }
    }

    if findings == 0 {
        info!("Audit completed: no inconsistencies found");
        ExitCode::SUCCESS
    } else {
        warn!("Audit completed: {} inconsistencies found", findings);
        if args.fix {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}
