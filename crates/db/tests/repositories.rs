//! Integration tests for the repository layer against a real database.

use actory_core::messaging::conversation_id;
use actory_core::role_switch::SwitchStatus;
use actory_core::verification::generate_otp;
use actory_db::models::casting_call::{CreateCastingCall, UpdateCastingCall};
use actory_db::models::message::CreateMessage;
use actory_db::models::pending_registration::UpsertPendingRegistration;
use actory_db::models::user::CreateUser;
use actory_db::models::video::CreateVideo;
use actory_db::repositories::{
    CastingCallRepo, FollowRepo, MessageRepo, PendingRegistrationRepo, ProfileVideoRepo,
    RoleSwitchRequestRepo, UserRepo, VideoRepo,
};
use chrono::{Duration, NaiveDate, Utc};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(email: &str, role: &str) -> CreateUser {
    CreateUser {
        name: format!("User {email}"),
        email: email.to_string(),
        password_hash: "hash".to_string(),
        role: role.to_string(),
        phone: Some("5551234567".to_string()),
        location: Some("Kochi".to_string()),
        age: Some(25),
        gender: Some("female".to_string()),
        experience_level: Some("beginner".to_string()),
        bio: None,
        company_name: None,
        website: None,
        skills: vec![],
        is_email_verified: true,
    }
}

fn new_call(days_ahead: i64) -> CreateCastingCall {
    let now = Utc::now();
    CreateCastingCall {
        role_name: "Lead".to_string(),
        description: "Lead role".to_string(),
        age_min: 20,
        age_max: 30,
        height_min_cm: None,
        height_max_cm: None,
        location: "Kochi".to_string(),
        skills: vec!["acting".to_string()],
        submission_deadline: now + Duration::days(days_ahead),
        audition_date: now + Duration::days(days_ahead + 1),
        shoot_start_date: now + Duration::days(days_ahead + 2),
        shoot_end_date: now + Duration::days(days_ahead + 3),
    }
}

fn new_video() -> CreateVideo {
    CreateVideo {
        title: "Audition".to_string(),
        video_url: "https://media.example/v.mp4".to_string(),
        media_public_id: None,
        portfolio_url: None,
        height_cm: 170,
        weight_kg: 60,
        age: 25,
        skin_tone: "medium".to_string(),
        skills: vec!["acting".to_string()],
        permanent_address: "1 Main St".to_string(),
        living_city: "Kochi".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        phone_number: "5551234567".to_string(),
        email: Some("actor@example.com".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Users and pending registrations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_is_unique_violation(pool: PgPool) {
    UserRepo::create(&pool, &new_user("dup@example.com", "Actor"))
        .await
        .unwrap();
    let err = UserRepo::create(&pool, &new_user("dup@example.com", "Actor"))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pending_registration_confirm_creates_verified_user(pool: PgPool) {
    let mut user = new_user("new@example.com", "Actor");
    user.is_email_verified = false;
    let otp = generate_otp();
    PendingRegistrationRepo::upsert(
        &pool,
        &UpsertPendingRegistration {
            user,
            otp: otp.clone(),
            expire_at: Utc::now() + Duration::minutes(5),
        },
    )
    .await
    .unwrap();

    let wrong = PendingRegistrationRepo::confirm(&pool, "new@example.com", "000000x", Utc::now())
        .await
        .unwrap();
    assert!(wrong.is_none());

    let created = PendingRegistrationRepo::confirm(&pool, "new@example.com", &otp, Utc::now())
        .await
        .unwrap()
        .expect("user created");
    assert!(created.is_email_verified);
    assert!(PendingRegistrationRepo::find_by_email(&pool, "new@example.com")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_pending_registration_cannot_confirm(pool: PgPool) {
    PendingRegistrationRepo::upsert(
        &pool,
        &UpsertPendingRegistration {
            user: new_user("late@example.com", "Actor"),
            otp: "123456".to_string(),
            expire_at: Utc::now() - Duration::minutes(1),
        },
    )
    .await
    .unwrap();

    let result = PendingRegistrationRepo::confirm(&pool, "late@example.com", "123456", Utc::now())
        .await
        .unwrap();
    assert!(result.is_none());

    let purged = PendingRegistrationRepo::delete_expired(&pool, Utc::now())
        .await
        .unwrap();
    assert_eq!(purged, 1);
}

// ---------------------------------------------------------------------------
// Casting calls and submissions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_call_cascades_to_submissions(pool: PgPool) {
    let producer = UserRepo::create(&pool, &new_user("p@example.com", "Producer"))
        .await
        .unwrap();
    let actor = UserRepo::create(&pool, &new_user("a@example.com", "Actor"))
        .await
        .unwrap();
    let call = CastingCallRepo::create(&pool, producer.id, &new_call(5))
        .await
        .unwrap();
    let video = VideoRepo::create(&pool, actor.id, call.id, &new_video())
        .await
        .unwrap();
    assert_eq!(video.status, "Pending");

    assert!(CastingCallRepo::delete(&pool, call.id).await.unwrap());
    assert!(VideoRepo::find_by_id(&pool, video.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_open_hides_passed_auditions(pool: PgPool) {
    let producer = UserRepo::create(&pool, &new_user("p@example.com", "Producer"))
        .await
        .unwrap();
    let call = CastingCallRepo::create(&pool, producer.id, &new_call(2))
        .await
        .unwrap();

    let open = CastingCallRepo::list_open(&pool, Utc::now()).await.unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].producer_name, producer.name);

    // Seen from a point after the audition, the call is hidden.
    let later = Utc::now() + Duration::days(4);
    assert!(CastingCallRepo::list_open(&pool, later).await.unwrap().is_empty());
    assert!(CastingCallRepo::find_open(&pool, call.id, later)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_expired_uses_shoot_end(pool: PgPool) {
    let producer = UserRepo::create(&pool, &new_user("p@example.com", "Producer"))
        .await
        .unwrap();
    CastingCallRepo::create(&pool, producer.id, &new_call(1))
        .await
        .unwrap();

    // Audition passed but shoot still running: kept.
    let mid_shoot = Utc::now() + Duration::days(3) + Duration::hours(12);
    assert_eq!(
        CastingCallRepo::delete_expired(&pool, mid_shoot).await.unwrap(),
        0
    );

    let after_shoot = Utc::now() + Duration::days(5);
    assert_eq!(
        CastingCallRepo::delete_expired(&pool, after_shoot).await.unwrap(),
        1
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_update_keeps_other_fields(pool: PgPool) {
    let producer = UserRepo::create(&pool, &new_user("p@example.com", "Producer"))
        .await
        .unwrap();
    let call = CastingCallRepo::create(&pool, producer.id, &new_call(5))
        .await
        .unwrap();

    let updated = CastingCallRepo::update(
        &pool,
        call.id,
        &UpdateCastingCall {
            location: Some("Chennai".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.location, "Chennai");
    assert_eq!(updated.role_name, call.role_name);
    assert_eq!(updated.audition_date, call.audition_date);
}

// ---------------------------------------------------------------------------
// Messaging
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_conversation_summaries_and_unread_counts(pool: PgPool) {
    let a = UserRepo::create(&pool, &new_user("a@example.com", "Actor"))
        .await
        .unwrap();
    let b = UserRepo::create(&pool, &new_user("b@example.com", "Producer"))
        .await
        .unwrap();
    let c = UserRepo::create(&pool, &new_user("c@example.com", "Producer"))
        .await
        .unwrap();

    for (sender, recipient, text) in [(b.id, a.id, "hi"), (b.id, a.id, "there"), (c.id, a.id, "yo")] {
        MessageRepo::create(
            &pool,
            &CreateMessage {
                sender_id: sender,
                recipient_id: recipient,
                content: text.to_string(),
                conversation_id: conversation_id(sender, recipient),
            },
        )
        .await
        .unwrap();
    }

    assert_eq!(MessageRepo::unread_sender_count(&pool, a.id).await.unwrap(), 2);

    let summaries = MessageRepo::conversations(&pool, a.id).await.unwrap();
    assert_eq!(summaries.len(), 2);
    let with_b = summaries
        .iter()
        .find(|s| s.other_user_id == b.id)
        .expect("conversation with b");
    assert_eq!(with_b.message_count, 2);
    assert_eq!(with_b.unread_count, 2);
    assert_eq!(with_b.last_message, "there");

    let marked = MessageRepo::mark_conversation_read(&pool, &conversation_id(a.id, b.id), a.id)
        .await
        .unwrap();
    assert_eq!(marked, 2);
    assert_eq!(MessageRepo::unread_sender_count(&pool, a.id).await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Role switch requests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_only_one_pending_switch_request(pool: PgPool) {
    let actor = UserRepo::create(&pool, &new_user("a@example.com", "Actor"))
        .await
        .unwrap();
    RoleSwitchRequestRepo::create(&pool, actor.id, "first")
        .await
        .unwrap();
    let err = RoleSwitchRequestRepo::create(&pool, actor.id, "second")
        .await
        .unwrap_err();
    assert_eq!(
        err.as_database_error().and_then(|e| e.code()).as_deref(),
        Some("23505")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_approval_promotes_actor_once(pool: PgPool) {
    let actor = UserRepo::create(&pool, &new_user("a@example.com", "Actor"))
        .await
        .unwrap();
    let admin = UserRepo::create(&pool, &new_user("admin@example.com", "Admin"))
        .await
        .unwrap();
    let request = RoleSwitchRequestRepo::create(&pool, actor.id, "I run a studio")
        .await
        .unwrap();

    let reviewed = RoleSwitchRequestRepo::review(&pool, request.id, SwitchStatus::Approved, admin.id)
        .await
        .unwrap()
        .expect("pending request reviewed");
    assert_eq!(reviewed.status, "Approved");
    assert_eq!(reviewed.reviewed_by, Some(admin.id));

    let promoted = UserRepo::find_by_id(&pool, actor.id).await.unwrap().unwrap();
    assert_eq!(promoted.role, "Producer");

    // Already closed.
    let again = RoleSwitchRequestRepo::review(&pool, request.id, SwitchStatus::Rejected, admin.id)
        .await
        .unwrap();
    assert!(again.is_none());
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_follow_is_idempotent_and_counted(pool: PgPool) {
    let a = UserRepo::create(&pool, &new_user("a@example.com", "Actor"))
        .await
        .unwrap();
    let b = UserRepo::create(&pool, &new_user("b@example.com", "Actor"))
        .await
        .unwrap();

    FollowRepo::follow(&pool, a.id, b.id).await.unwrap();
    FollowRepo::follow(&pool, a.id, b.id).await.unwrap();
    assert!(FollowRepo::is_following(&pool, a.id, b.id).await.unwrap());

    let stats = ProfileVideoRepo::stats(&pool, b.id).await.unwrap();
    assert_eq!(stats.follower_count, 1);
    assert_eq!(stats.following_count, 0);

    FollowRepo::unfollow(&pool, a.id, b.id).await.unwrap();
    FollowRepo::unfollow(&pool, a.id, b.id).await.unwrap();
    assert!(!FollowRepo::is_following(&pool, a.id, b.id).await.unwrap());
}
