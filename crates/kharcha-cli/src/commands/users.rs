//! User registration command

use anyhow::Result;

use kharcha_core::auth;
use kharcha_core::db::Database;
use kharcha_core::models::NewUser;

#[allow(clippy::too_many_arguments)]
pub fn cmd_signup(
    db: &Database,
    name: &str,
    email: &str,
    password: &str,
    salary: f64,
    dob: Option<&str>,
    phone: Option<&str>,
) -> Result<()> {
    let user = NewUser {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        phone: phone.map(str::to_string),
        dob: dob.map(str::to_string),
        salary,
        gender: None,
        job: None,
        address: None,
    };

    let id = auth::signup(db, &user)?;

    println!("✅ Registered {} (user #{})", email, id);
    println!("   Monthly salary: {:.2}", salary);
    if dob.is_none() {
        println!("   💡 Tip: set --dob to enable password reset");
    }

    Ok(())
}
