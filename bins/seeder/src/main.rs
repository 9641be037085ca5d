//! Database seeder for Punktwerk development and testing.
//!
//! Seeds a cashier account and a demo member so the API is usable
//! immediately after migration. Safe to re-run; existing accounts are
//! left untouched.
//!
//! Usage: cargo run --bin seeder

use punktwerk_core::auth::hash_password;
use punktwerk_db::UserRepository;

const CASHIER_EMAIL: &str = "kasse@punktwerk.dev";
const MEMBER_EMAIL: &str = "mitglied@punktwerk.dev";
const DEV_PASSWORD: &str = "punktwerk-dev";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = punktwerk_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let repo = UserRepository::new(db);

    println!("Seeding cashier account...");
    seed_user(&repo, CASHIER_EMAIL, "Kasse", true).await;

    println!("Seeding demo member...");
    seed_user(&repo, MEMBER_EMAIL, "Demo Mitglied", false).await;

    println!("Seeding complete!");
}

async fn seed_user(repo: &UserRepository, email: &str, full_name: &str, is_cashier: bool) {
    let exists = repo
        .email_exists(email)
        .await
        .expect("Failed to check for existing user");

    if exists {
        println!("  {email} already exists, skipping");
        return;
    }

    let password_hash = hash_password(DEV_PASSWORD).expect("Failed to hash password");

    let user = repo
        .create(email, &password_hash, full_name, is_cashier)
        .await
        .expect("Failed to create user");

    println!("  Created {email} (id {})", user.id);
}
