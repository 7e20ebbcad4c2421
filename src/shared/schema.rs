//! Table definitions mirroring the sync job's Postgres schema.

diesel::table! {
    users (id) {
        id -> BigInt,
        name -> Nullable<Text>,
        email -> Nullable<Text>,
        role -> Nullable<Text>,
        role_type -> Nullable<Integer>,
        active -> Nullable<Bool>,
        suspended -> Nullable<Bool>,
        organization_id -> Nullable<BigInt>,
        phone -> Nullable<Text>,
        locale -> Nullable<Text>,
        time_zone -> Nullable<Text>,
        created_at -> Nullable<Timestamptz>,
        updated_at -> Nullable<Timestamptz>,
        last_login_at -> Nullable<Timestamptz>,
        tags_json -> Nullable<Jsonb>,
        user_fields_json -> Nullable<Jsonb>,
        photo_json -> Nullable<Jsonb>,
    }
}

diesel::table! {
    organizations (id) {
        id -> BigInt,
        name -> Nullable<Text>,
        external_id -> Nullable<Text>,
        group_id -> Nullable<BigInt>,
        details -> Nullable<Text>,
        notes -> Nullable<Text>,
        shared_tickets -> Nullable<Bool>,
        shared_comments -> Nullable<Bool>,
        domain_names_json -> Nullable<Jsonb>,
        tags_json -> Nullable<Jsonb>,
        organization_fields_json -> Nullable<Jsonb>,
        created_at -> Nullable<Timestamptz>,
        updated_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    tickets (id) {
        id -> BigInt,
        subject -> Nullable<Text>,
        description -> Nullable<Text>,
        status -> Nullable<Text>,
        priority -> Nullable<Text>,
        #[sql_name = "type"]
        ticket_type -> Nullable<Text>,
        requester_id -> Nullable<BigInt>,
        assignee_id -> Nullable<BigInt>,
        organization_id -> Nullable<BigInt>,
        created_at -> Nullable<Timestamptz>,
        updated_at -> Nullable<Timestamptz>,
        due_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    ticket_comments (id) {
        id -> BigInt,
        ticket_id -> BigInt,
        author_id -> Nullable<BigInt>,
        public -> Bool,
        body -> Nullable<Text>,
        created_at -> Nullable<Timestamptz>,
        updated_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    attachments (id) {
        id -> BigInt,
        ticket_id -> Nullable<BigInt>,
        comment_id -> Nullable<BigInt>,
        file_name -> Nullable<Text>,
        content_url -> Nullable<Text>,
        local_path -> Nullable<Text>,
        content_type -> Nullable<Text>,
        size -> Nullable<BigInt>,
        thumbnails_json -> Nullable<Jsonb>,
        created_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    views (id) {
        id -> BigInt,
        title -> Nullable<Text>,
        description -> Nullable<Text>,
        active -> Nullable<Bool>,
        position -> Nullable<Integer>,
        default_view -> Nullable<Bool>,
        restriction_json -> Nullable<Jsonb>,
        execution_json -> Nullable<Jsonb>,
        conditions_json -> Nullable<Jsonb>,
        created_at -> Nullable<Timestamptz>,
        updated_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    triggers (id) {
        id -> BigInt,
        title -> Nullable<Text>,
        description -> Nullable<Text>,
        active -> Nullable<Bool>,
        position -> Nullable<Integer>,
        category_id -> Nullable<Text>,
        raw_title -> Nullable<Text>,
        default_trigger -> Nullable<Bool>,
        conditions_json -> Jsonb,
        actions_json -> Jsonb,
        created_at -> Nullable<Timestamptz>,
        updated_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    trigger_categories (id) {
        id -> Text,
        name -> Nullable<Text>,
        position -> Nullable<Integer>,
        created_at -> Nullable<Timestamptz>,
        updated_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    macros (id) {
        id -> BigInt,
        title -> Nullable<Text>,
        description -> Nullable<Text>,
        active -> Nullable<Bool>,
        position -> Nullable<Integer>,
        default_macro -> Nullable<Bool>,
        restriction_json -> Nullable<Jsonb>,
        actions_json -> Jsonb,
        created_at -> Nullable<Timestamptz>,
        updated_at -> Nullable<Timestamptz>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    users,
    organizations,
    tickets,
    ticket_comments,
    attachments,
    views,
    triggers,
    trigger_categories,
    macros,
);
