//! 存储层一致性与选课生命周期测试（SQLite 内存库）

use super::SeaOrmStorage;
use crate::errors::GradeSystemError;
use crate::models::{
    courses::requests::CreateCourseRequest,
    enrollments::requests::RecordScoresRequest,
    users::{entities::AccountRole, requests::NewAccount},
};
use crate::storage::Storage;

async fn memory_storage() -> SeaOrmStorage {
    SeaOrmStorage::new_with_url("sqlite::memory:", 1, 5)
        .await
        .expect("in-memory storage")
}

fn new_account(username: &str) -> NewAccount {
    NewAccount {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "$argon2id$stub".to_string(),
        display_name: None,
        is_staff: false,
    }
}

fn new_course(code: &str, max_students: i32) -> CreateCourseRequest {
    CreateCourseRequest {
        course_code: code.to_string(),
        course_name: format!("课程 {code}"),
        description: None,
        teacher_id: None,
        credits: 3,
        max_students,
        semester: "2024-1".to_string(),
    }
}

#[tokio::test]
async fn test_register_student_creates_profile_atomically() {
    let storage = memory_storage().await;

    let account = storage
        .register_student(new_account("stu_alice"), Some("S2024001".to_string()))
        .await
        .expect("register");

    let profile = storage
        .get_profile_by_user_id(account.id)
        .await
        .expect("query profile")
        .expect("profile exists");

    assert_eq!(profile.role, AccountRole::Student);
    assert_eq!(profile.student_id.as_deref(), Some("S2024001"));
    assert!(!account.is_staff);
}

#[tokio::test]
async fn test_second_profile_for_same_account_is_rejected() {
    use sea_orm::{ActiveModelTrait, Set};

    let storage = memory_storage().await;
    let account = storage
        .register_student(new_account("stu_single"), None)
        .await
        .expect("register");

    // profiles.user_id 唯一索引挡住同一账号的第二份资料
    let now = chrono::Utc::now().timestamp();
    let duplicate = crate::entity::profiles::ActiveModel {
        user_id: Set(account.id),
        role: Set(AccountRole::Teacher.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&storage.db)
    .await;

    assert!(duplicate.is_err());
}

#[tokio::test]
async fn test_provision_teacher_creates_all_three_records() {
    let storage = memory_storage().await;

    let (account, teacher) = storage
        .provision_teacher(
            new_account("prof_wang"),
            "T1001".to_string(),
            Some("数学系".to_string()),
            None,
        )
        .await
        .expect("provision");

    assert_eq!(teacher.user_id, account.id);
    assert_eq!(teacher.teacher_id, "T1001");

    let profile = storage
        .get_profile_by_user_id(account.id)
        .await
        .expect("query profile")
        .expect("profile exists");
    assert_eq!(profile.role, AccountRole::Teacher);
    assert_eq!(profile.teacher_id.as_deref(), Some("T1001"));

    let by_number = storage
        .get_teacher_by_teacher_id("T1001")
        .await
        .expect("query by teacher number")
        .expect("teacher exists");
    assert_eq!(by_number.user_id, account.id);
}

#[tokio::test]
async fn test_enroll_is_idempotent() {
    let storage = memory_storage().await;
    let student = storage
        .register_student(new_account("stu_bobby"), None)
        .await
        .expect("register");
    let course = storage
        .create_course(new_course("CS101", 30))
        .await
        .expect("course");

    let first = storage
        .enroll_course(student.id, course.id)
        .await
        .expect("enroll");
    let second = storage
        .enroll_course(student.id, course.id)
        .await
        .expect("re-enroll");

    assert_eq!(first.id, second.id);
    assert!(second.is_active);

    let count = storage
        .count_active_enrollments(course.id)
        .await
        .expect("count");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_drop_and_reenroll_preserves_scores() {
    let storage = memory_storage().await;
    let student = storage
        .register_student(new_account("stu_carol"), None)
        .await
        .expect("register");
    let course = storage
        .create_course(new_course("CS102", 30))
        .await
        .expect("course");

    storage
        .enroll_course(student.id, course.id)
        .await
        .expect("enroll");
    storage
        .record_scores(
            student.id,
            course.id,
            RecordScoresRequest {
                midterm_score: Some(85.0),
                final_score: Some(92.0),
            },
        )
        .await
        .expect("record")
        .expect("active enrollment");

    assert!(storage.drop_course(student.id, course.id).await.expect("drop"));

    // 退课后记录仍在，成绩保留，状态不活跃
    let dropped = storage
        .get_enrollment(student.id, course.id)
        .await
        .expect("query")
        .expect("record kept");
    assert!(!dropped.is_active);
    assert_eq!(dropped.midterm_score, Some(85.0));
    assert_eq!(dropped.final_score, Some(92.0));

    // 重复退课无效
    assert!(!storage.drop_course(student.id, course.id).await.expect("drop again"));

    // 重新选课恢复原记录与成绩
    let restored = storage
        .enroll_course(student.id, course.id)
        .await
        .expect("re-enroll");
    assert_eq!(restored.id, dropped.id);
    assert!(restored.is_active);
    assert_eq!(restored.total_score(), Some(88.5));
}

#[tokio::test]
async fn test_enroll_rejects_when_capacity_exceeded() {
    let storage = memory_storage().await;
    let first = storage
        .register_student(new_account("stu_david"), None)
        .await
        .expect("register");
    let second = storage
        .register_student(new_account("stu_erika"), None)
        .await
        .expect("register");
    let course = storage
        .create_course(new_course("CS103", 1))
        .await
        .expect("course");

    storage
        .enroll_course(first.id, course.id)
        .await
        .expect("fills the course");

    let rejected = storage.enroll_course(second.id, course.id).await;
    assert!(matches!(
        rejected,
        Err(GradeSystemError::CapacityExceeded(_))
    ));

    // 第一人退课后空位释放，第二人可入；此时第一人重选同样受容量限制
    assert!(storage.drop_course(first.id, course.id).await.expect("drop"));
    storage
        .enroll_course(second.id, course.id)
        .await
        .expect("seat freed");

    let reenroll = storage.enroll_course(first.id, course.id).await;
    assert!(matches!(
        reenroll,
        Err(GradeSystemError::CapacityExceeded(_))
    ));
}

#[tokio::test]
async fn test_enroll_missing_course_is_not_found() {
    let storage = memory_storage().await;
    let student = storage
        .register_student(new_account("stu_frank"), None)
        .await
        .expect("register");

    let result = storage.enroll_course(student.id, 9999).await;
    assert!(matches!(result, Err(GradeSystemError::NotFound(_))));
}

#[tokio::test]
async fn test_record_scores_partial_update() {
    let storage = memory_storage().await;
    let student = storage
        .register_student(new_account("stu_grace"), None)
        .await
        .expect("register");
    let course = storage
        .create_course(new_course("CS104", 30))
        .await
        .expect("course");
    storage
        .enroll_course(student.id, course.id)
        .await
        .expect("enroll");

    // 只录期中
    let after_midterm = storage
        .record_scores(
            student.id,
            course.id,
            RecordScoresRequest {
                midterm_score: Some(77.77),
                final_score: None,
            },
        )
        .await
        .expect("record")
        .expect("active enrollment");
    assert_eq!(after_midterm.midterm_score, Some(77.77));
    assert_eq!(after_midterm.final_score, None);
    assert_eq!(after_midterm.total_score(), None);

    // 再录期末，期中保持
    let after_final = storage
        .record_scores(
            student.id,
            course.id,
            RecordScoresRequest {
                midterm_score: None,
                final_score: Some(88.88),
            },
        )
        .await
        .expect("record")
        .expect("active enrollment");
    assert_eq!(after_final.midterm_score, Some(77.77));
    // (77.77 + 88.88) / 2 = 83.325 -> 83.33
    assert_eq!(after_final.total_score(), Some(83.33));

    // 退课后不可录入
    storage.drop_course(student.id, course.id).await.expect("drop");
    let on_dropped = storage
        .record_scores(
            student.id,
            course.id,
            RecordScoresRequest {
                midterm_score: Some(60.0),
                final_score: None,
            },
        )
        .await
        .expect("record");
    assert!(on_dropped.is_none());
}

#[tokio::test]
async fn test_transcript_totals_and_average() {
    let storage = memory_storage().await;
    let student = storage
        .register_student(new_account("stu_helen"), None)
        .await
        .expect("register");
    let full = storage
        .create_course(new_course("CS105", 30))
        .await
        .expect("course");
    let partial = storage
        .create_course(new_course("CS106", 30))
        .await
        .expect("course");

    storage.enroll_course(student.id, full.id).await.expect("enroll");
    storage.enroll_course(student.id, partial.id).await.expect("enroll");

    storage
        .record_scores(
            student.id,
            full.id,
            RecordScoresRequest {
                midterm_score: Some(80.0),
                final_score: Some(90.0),
            },
        )
        .await
        .expect("record")
        .expect("active");
    storage
        .record_scores(
            student.id,
            partial.id,
            RecordScoresRequest {
                midterm_score: Some(70.0),
                final_score: None,
            },
        )
        .await
        .expect("record")
        .expect("active");

    let transcript = storage.get_transcript(student.id).await.expect("transcript");
    assert_eq!(transcript.entries.len(), 2);

    let totals: Vec<Option<f64>> = transcript.entries.iter().map(|e| e.total_score).collect();
    assert!(totals.contains(&Some(85.0)));
    assert!(totals.contains(&None));

    // 平均分只统计总评齐全的课程
    assert_eq!(transcript.average_score, 85.0);
}

#[tokio::test]
async fn test_roster_lists_active_students_only() {
    let storage = memory_storage().await;
    let staying = storage
        .register_student(new_account("stu_irene"), Some("S2024002".to_string()))
        .await
        .expect("register");
    let leaving = storage
        .register_student(new_account("stu_jacky"), None)
        .await
        .expect("register");
    let course = storage
        .create_course(new_course("CS107", 30))
        .await
        .expect("course");

    storage.enroll_course(staying.id, course.id).await.expect("enroll");
    storage.enroll_course(leaving.id, course.id).await.expect("enroll");
    storage.drop_course(leaving.id, course.id).await.expect("drop");

    let roster = storage.get_roster(course.id).await.expect("roster");
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].username, "stu_irene");
    assert_eq!(roster[0].student_id.as_deref(), Some("S2024002"));
}

#[tokio::test]
async fn test_audit_flags_teacher_record_with_wrong_role() {
    use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

    let storage = memory_storage().await;
    let (account, _teacher) = storage
        .provision_teacher(new_account("prof_lena"), "T1003".to_string(), None, None)
        .await
        .expect("provision");

    assert!(
        storage
            .find_misclassified_teacher_records()
            .await
            .expect("audit")
            .is_empty()
    );

    // 人为制造角色错配：资料角色改成学生，教师档案留在原地
    let profile = crate::entity::profiles::Entity::find()
        .filter(crate::entity::profiles::Column::UserId.eq(account.id))
        .one(&storage.db)
        .await
        .expect("query profile")
        .expect("profile exists");
    crate::entity::profiles::ActiveModel {
        id: Set(profile.id),
        role: Set(AccountRole::Student.to_string()),
        ..Default::default()
    }
    .update(&storage.db)
    .await
    .expect("corrupt profile role");

    let flagged = storage
        .find_misclassified_teacher_records()
        .await
        .expect("audit");
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].user_id, account.id);
}

#[tokio::test]
async fn test_audit_finds_and_repairs_orphan_teacher_profile() {
    use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

    let storage = memory_storage().await;
    let (account, _teacher) = storage
        .provision_teacher(new_account("prof_kent"), "T1002".to_string(), None, None)
        .await
        .expect("provision");

    // 健康状态下审计无发现
    assert!(storage.find_accounts_without_profiles().await.expect("audit").is_empty());
    assert!(storage.find_orphan_teacher_profiles().await.expect("audit").is_empty());

    // 人为制造缺档：直接删掉教师档案行
    crate::entity::teachers::Entity::delete_many()
        .filter(crate::entity::teachers::Column::UserId.eq(account.id))
        .exec(&storage.db)
        .await
        .expect("corrupt teacher record");

    let orphans = storage.find_orphan_teacher_profiles().await.expect("audit");
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].user_id, account.id);

    // 按资料中的工号补建
    let teacher_id = orphans[0].teacher_id.as_deref().expect("profile keeps number");
    storage
        .create_missing_teacher_record(account.id, teacher_id)
        .await
        .expect("repair");

    assert!(storage.find_orphan_teacher_profiles().await.expect("audit").is_empty());
}
