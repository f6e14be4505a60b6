use uuid::Uuid;

pub fn generate_session_token() -> String {
    Uuid::new_v4().to_string()
}
