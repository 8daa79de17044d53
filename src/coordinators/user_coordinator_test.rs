#[cfg(test)]
mod tests {
    use crate::coordinators::{
        LocationCoordinator, LocationDraft, NewUser, RoleCoordinator, SelfUpdate, UserCoordinator,
    };
    use crate::errors::ErrorKind;
    use crate::errors::internal::{InternalError, UserError, ValidationError};
    use crate::stores::UserStore;
    use crate::test::utils::{create_user_with_roles, ctx_for, setup_test_app_data};
    use crate::types::internal::context::RequestContext;

    fn new_user(username: &str, roles: &[&str]) -> NewUser {
        NewUser {
            username: username.to_string(),
            password: "Password123!".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_admin_creates_user_with_roles() {
        let app_data = setup_test_app_data().await;
        let admin = create_user_with_roles(&app_data.db, "galkadi", &["Admin"]).await;
        create_user_with_roles(&app_data.db, "bob", &["User"]).await;
        let users = UserCoordinator::new(app_data.clone());

        let created = users.create(&ctx_for(&admin), new_user("sue", &["user"])).await.unwrap();

        assert_eq!(created.username, "sue");
        assert_eq!(created.roles, vec!["User"]);
    }

    #[tokio::test]
    async fn test_create_requires_roles() {
        let app_data = setup_test_app_data().await;
        let admin = create_user_with_roles(&app_data.db, "galkadi", &["Admin"]).await;
        let users = UserCoordinator::new(app_data.clone());

        let err = users.create(&ctx_for(&admin), new_user("sue", &[])).await.unwrap_err();

        assert!(matches!(err, InternalError::Validation(ValidationError::EmptyRoleList)));
    }

    #[tokio::test]
    async fn test_create_with_unknown_role_leaves_no_user() {
        let app_data = setup_test_app_data().await;
        let admin = create_user_with_roles(&app_data.db, "galkadi", &["Admin"]).await;
        let users = UserCoordinator::new(app_data.clone());

        let err = users
            .create(&ctx_for(&admin), new_user("sue", &["Admin", "Ghost"]))
            .await
            .unwrap_err();

        assert!(matches!(err, InternalError::Validation(ValidationError::UnknownRole { ref name }) if name == "Ghost"));
        assert!(UserStore::new().find_by_name(&app_data.db, "sue").await.is_err());
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let app_data = setup_test_app_data().await;
        let admin = create_user_with_roles(&app_data.db, "galkadi", &["Admin"]).await;
        let users = UserCoordinator::new(app_data.clone());

        users.create(&ctx_for(&admin), new_user("Sue", &["Admin"])).await.unwrap();
        let err = users.create(&ctx_for(&admin), new_user("sUE", &["Admin"])).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_non_admin_cannot_create_users() {
        let app_data = setup_test_app_data().await;
        let bob = create_user_with_roles(&app_data.db, "bob", &["User"]).await;
        let users = UserCoordinator::new(app_data.clone());

        let err = users.create(&ctx_for(&bob), new_user("eve", &["User"])).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_get_self_or_admin() {
        let app_data = setup_test_app_data().await;
        let admin = create_user_with_roles(&app_data.db, "galkadi", &["Admin"]).await;
        let bob = create_user_with_roles(&app_data.db, "bob", &["User"]).await;
        let sue = create_user_with_roles(&app_data.db, "sue", &["User"]).await;
        let users = UserCoordinator::new(app_data.clone());

        assert_eq!(users.get(&ctx_for(&bob), bob.user_id).await.unwrap().username, "bob");
        assert_eq!(users.get(&ctx_for(&admin), bob.user_id).await.unwrap().username, "bob");

        let err = users.get(&ctx_for(&sue), bob.user_id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);

        let err = users.get(&RequestContext::for_api(None), bob.user_id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthenticated);
    }

    #[tokio::test]
    async fn test_update_self_rename() {
        let app_data = setup_test_app_data().await;
        let bob = create_user_with_roles(&app_data.db, "bob", &["User"]).await;
        create_user_with_roles(&app_data.db, "sue", &["User"]).await;
        let users = UserCoordinator::new(app_data.clone());

        let taken = SelfUpdate {
            username: Some("SUE".to_string()),
            password: None,
        };
        let err = users.update_self(&ctx_for(&bob), taken).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let rename = SelfUpdate {
            username: Some("robert".to_string()),
            password: None,
        };
        let updated = users.update_self(&ctx_for(&bob), rename).await.unwrap();
        assert_eq!(updated.username, "robert");

        let err = users.update_self(&ctx_for(&bob), SelfUpdate::default()).await.unwrap_err();
        assert!(matches!(err, InternalError::Validation(ValidationError::EmptyUpdate)));
    }

    #[tokio::test]
    async fn test_delete_user_managing_location_conflicts() {
        let app_data = setup_test_app_data().await;
        let admin = create_user_with_roles(&app_data.db, "galkadi", &["Admin"]).await;
        let bob = create_user_with_roles(&app_data.db, "bob", &["User"]).await;
        let users = UserCoordinator::new(app_data.clone());
        let locations = LocationCoordinator::new(app_data.clone());
        let location = locations
            .create(
                &ctx_for(&admin),
                LocationDraft {
                    name: "Location 1".to_string(),
                    address: "123 Main St".to_string(),
                    table_count: 10,
                    manager_id: Some(bob.user_id),
                },
            )
            .await
            .unwrap();

        let err = users.delete(&ctx_for(&admin), bob.user_id).await.unwrap_err();
        assert!(matches!(err, InternalError::User(UserError::ManagesLocations { .. })));

        locations.delete(&ctx_for(&admin), location.id).await.unwrap();
        users.delete(&ctx_for(&admin), bob.user_id).await.unwrap();
        let err = users.get(&ctx_for(&admin), bob.user_id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_grant_and_revoke_are_idempotent() {
        let app_data = setup_test_app_data().await;
        let admin = create_user_with_roles(&app_data.db, "galkadi", &["Admin"]).await;
        let bob = create_user_with_roles(&app_data.db, "bob", &["User"]).await;
        let users = UserCoordinator::new(app_data.clone());
        let roles = RoleCoordinator::new(app_data.clone());
        let admin_role = roles
            .list(&ctx_for(&admin))
            .await
            .unwrap()
            .into_iter()
            .find(|r| r.name == "Admin")
            .unwrap();

        let granted = users.grant_role(&ctx_for(&admin), bob.user_id, admin_role.id).await.unwrap();
        assert!(granted.is_admin());
        let again = users.grant_role(&ctx_for(&admin), bob.user_id, admin_role.id).await.unwrap();
        assert_eq!(again.roles, granted.roles);

        let revoked = users.revoke_role(&ctx_for(&admin), bob.user_id, admin_role.id).await.unwrap();
        assert!(!revoked.is_admin());
        let again = users.revoke_role(&ctx_for(&admin), bob.user_id, admin_role.id).await.unwrap();
        assert_eq!(again.roles, vec!["User"]);
    }

    #[tokio::test]
    async fn test_role_in_use_cannot_be_deleted() {
        let app_data = setup_test_app_data().await;
        let admin = create_user_with_roles(&app_data.db, "galkadi", &["Admin"]).await;
        create_user_with_roles(&app_data.db, "bob", &["User"]).await;
        let roles = RoleCoordinator::new(app_data.clone());
        let user_role = roles
            .list(&ctx_for(&admin))
            .await
            .unwrap()
            .into_iter()
            .find(|r| r.name == "User")
            .unwrap();

        let err = roles.delete(&ctx_for(&admin), user_role.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let members = roles.members(&ctx_for(&admin), user_role.id).await.unwrap();
        assert_eq!(members.len(), 1);
    }

    #[tokio::test]
    async fn test_role_management_is_admin_only() {
        let app_data = setup_test_app_data().await;
        let bob = create_user_with_roles(&app_data.db, "bob", &["User"]).await;
        let roles = RoleCoordinator::new(app_data.clone());

        let err = roles.create(&ctx_for(&bob), "Managers").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);

        let err = roles.list(&RequestContext::for_api(None)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthenticated);
    }
}
