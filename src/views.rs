//! HTML rendering via minijinja templates compiled into the binary.

use axum::response::Html;
use minijinja::Environment;
use serde::Serialize;

use crate::error::AppError;

pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("home.html", include_str!("../templates/home.html"))?;
    env.add_template("cafe_form.html", include_str!("../templates/cafe_form.html"))?;
    env.add_template(
        "confirm_delete.html",
        include_str!("../templates/confirm_delete.html"),
    )?;
    Ok(env)
}

pub fn render<S: Serialize>(
    env: &Environment<'static>,
    name: &str,
    ctx: S,
) -> Result<Html<String>, AppError> {
    let template = env.get_template(name)?;
    Ok(Html(template.render(ctx)?))
}
