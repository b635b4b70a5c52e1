// Database schema for project storage
diesel::table! {
    projects (id) {
        id -> Text,
        title -> Text,
        description -> Text,
        tech_requirements -> Text,       // JSON array of strings
        is_private -> Bool,
        github_link -> Nullable<Text>,
        owner_id -> Text,
        current_contributor_ids -> Text, // JSON array, null entries kept
        past_contributor_ids -> Text,    // JSON array, null entries kept
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    users (id) {
        id -> Text,
        username -> Text,
        profile_pic_url -> Nullable<Text>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(projects, users,);

pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS projects (
    id TEXT PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    tech_requirements TEXT NOT NULL DEFAULT '[]',
    is_private BOOLEAN NOT NULL DEFAULT 0,
    github_link TEXT,
    owner_id TEXT NOT NULL,
    current_contributor_ids TEXT NOT NULL DEFAULT '[]',
    past_contributor_ids TEXT NOT NULL DEFAULT '[]',
    created_at TIMESTAMP NOT NULL,
    updated_at TIMESTAMP NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_projects_owner_id ON projects (owner_id);
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY NOT NULL,
    username TEXT NOT NULL,
    profile_pic_url TEXT
);
";
