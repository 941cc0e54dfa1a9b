// Diesel table definitions for the larder database.
//
// Primary identities default to gen_random_uuid() and timestamps default to
// now() on the server; see sql/schema.sql for the reference DDL.

diesel::table! {
    users (user_uuid) {
        user_uuid -> Uuid,
        #[max_length = 255]
        hashed_password -> Varchar,
        active -> Bool,
        #[max_length = 255]
        first_name -> Varchar,
        #[max_length = 255]
        last_name -> Varchar,
        #[max_length = 255]
        email_address -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    ingredients (ingredient_uuid) {
        ingredient_uuid -> Uuid,
        #[max_length = 255]
        ingredient_name -> Varchar,
        #[max_length = 50]
        category -> Varchar,
        days_until_exp -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    fridge_ingredients (user_uuid, ingredient_uuid) {
        user_uuid -> Uuid,
        ingredient_uuid -> Uuid,
        amount -> Int4,
        #[max_length = 50]
        unit -> Varchar,
        purchased_date -> Timestamptz,
        expiration_date -> Timestamptz,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    recipes (recipe_uuid) {
        recipe_uuid -> Uuid,
        user_uuid -> Uuid,
        #[max_length = 255]
        recipe_name -> Varchar,
        #[max_length = 50]
        category -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    recipe_ingredients (recipe_uuid, ingredient_uuid) {
        recipe_uuid -> Uuid,
        ingredient_uuid -> Uuid,
        amount -> Int4,
        #[max_length = 50]
        unit -> Varchar,
    }
}

diesel::table! {
    recipe_instructions (recipe_uuid, step_num) {
        recipe_uuid -> Uuid,
        step_num -> Int4,
        instruction -> Text,
    }
}

diesel::joinable!(fridge_ingredients -> users (user_uuid));
diesel::joinable!(fridge_ingredients -> ingredients (ingredient_uuid));
diesel::joinable!(recipes -> users (user_uuid));
diesel::joinable!(recipe_ingredients -> ingredients (ingredient_uuid));
diesel::joinable!(recipe_instructions -> recipes (recipe_uuid));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    ingredients,
    fridge_ingredients,
    recipes,
    recipe_ingredients,
    recipe_instructions,
);
