#[cfg(test)]
mod tests {
    use crate::database::entity::{post, user};
    use crate::database::postgres_repo::{PostgresPostRepository, PostgresUserRepository};
    use scribe_core::domain::{Post, User};
    use scribe_core::error::RepoError;
    use scribe_core::ports::{BaseRepository, PostRepository, UserRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn post_model(id: uuid::Uuid, creator: uuid::Uuid) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id,
            title: "Test Post".to_owned(),
            category: "rust".to_owned(),
            description: "A longer description".to_owned(),
            thumbnail: "thumb.png".to_owned(),
            creator,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let post_id = uuid::Uuid::new_v4();
        let creator = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(post_id, creator)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        assert!(result.is_some());
        let found = result.unwrap();
        assert_eq!(found.title, "Test Post");
        assert_eq!(found.id, post_id);
        assert_eq!(found.creator, creator);
    }

    #[tokio::test]
    async fn test_find_posts_by_category() {
        let creator = uuid::Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                post_model(uuid::Uuid::new_v4(), creator),
                post_model(uuid::Uuid::new_v4(), creator),
            ]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = repo.find_by_category("rust").await.unwrap();
        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_find_user_by_email() {
        let user_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user::Model {
                id: user_id,
                name: "Ann".to_owned(),
                email: "ann@example.com".to_owned(),
                password_hash: "$argon2id$stub".to_owned(),
                avatar: None,
                posts: 0,
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        let result: Option<User> = repo.find_by_email("ann@example.com").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().email, "ann@example.com");
    }

    #[tokio::test]
    async fn test_adjust_post_count_requires_existing_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        let result = repo.adjust_post_count(uuid::Uuid::new_v4(), 1).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_adjust_post_count_success() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        repo.adjust_post_count(uuid::Uuid::new_v4(), -1).await.unwrap();
    }
}
