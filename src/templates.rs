//! HTML templates compiled into the binary and their helpers.

use chrono::TimeDelta;
use handlebars::{Handlebars, TemplateError, handlebars_helper};

use crate::{format, validation::mask_national_id};

pub const ADMIN_EMPLOYEES: &str = "admin_employees";
pub const ADMIN_SESSIONS: &str = "admin_sessions";
pub const DASHBOARD: &str = "dashboard";
pub const KIOSK: &str = "kiosk";
pub const SCAN: &str = "scan";

handlebars_helper!(cpf_mask: |cpf: str| mask_national_id(cpf));
handlebars_helper!(duration_hhmm: |us: i64| format::format_hhmm(TimeDelta::microseconds(us)));
handlebars_helper!(duration_hhmmss: |us: i64| format::format_hhmmss(TimeDelta::microseconds(us)));

/// Build the registry with every page template and helper.
pub fn registry() -> Result<Handlebars<'static>, TemplateError> {
    let mut hb = Handlebars::new();

    hb.register_helper("cpf_mask", Box::new(cpf_mask));
    hb.register_helper("duration_hhmm", Box::new(duration_hhmm));
    hb.register_helper("duration_hhmmss", Box::new(duration_hhmmss));

    hb.register_partial("layout_head", include_str!("../templates/layout_head.hbs"))?;
    hb.register_template_string(
        ADMIN_EMPLOYEES,
        include_str!("../templates/admin_employees.hbs"),
    )?;
    hb.register_template_string(ADMIN_SESSIONS, include_str!("../templates/admin_sessions.hbs"))?;
    hb.register_template_string(DASHBOARD, include_str!("../templates/dashboard.hbs"))?;
    hb.register_template_string(KIOSK, include_str!("../templates/kiosk.hbs"))?;
    hb.register_template_string(SCAN, include_str!("../templates/scan.hbs"))?;

    Ok(hb)
}
