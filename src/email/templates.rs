use crate::auth::reset_code::CODE_TTL_MINUTES;

pub const RESET_CODE_SUBJECT: &str = "Password reset code";

pub fn render_reset_code(code: &str) -> String {
    format!(
        "Your password reset code: {code}\n\n\
         The code expires in {CODE_TTL_MINUTES} minutes. \
         If you did not request a password reset, you can ignore this email.\n"
    )
}
