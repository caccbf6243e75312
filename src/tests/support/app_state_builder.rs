use std::sync::Arc;

use actix_web::web;

use crate::auth::application::orchestrator::user_registration::UserRegistrationOrchestrator;
use crate::auth::application::services::password::BasicPasswordPolicy;
use crate::auth::application::services::TokenIssuer;
use crate::auth::application::use_cases::{
    activate_account::{ActivateAccountUseCase, IActivateAccountUseCase},
    create_user::CreateUserUseCase,
    login_user::{ILoginUserUseCase, LoginUserUseCase},
    logout_user::{ILogoutUseCase, LogoutUseCase},
    request_password_reset::{IRequestPasswordResetUseCase, RequestPasswordResetUseCase},
    request_reactivation::{IRequestReactivationUseCase, RequestReactivationUseCase},
    reset_password::{IResetPasswordUseCase, ResetPasswordUseCase},
};
use crate::auth::application::AccountUseCases;
use crate::blog::application::domain::reaction::{CommentTarget, PostTarget};
use crate::blog::application::ports::incoming::use_cases::{
    AddCommentUseCase, CreateCategoryUseCase, CreatePostUseCase, DeleteCommentUseCase,
    DeletePostUseCase, GetPostUseCase, ListCategoriesUseCase, ListPostsUseCase, ReactionUseCase,
    ToggleCommentActiveUseCase, UpdatePostUseCase,
};
use crate::blog::application::services::{
    AddCommentService, CreateCategoryService, CreatePostService, DeleteCommentService,
    DeletePostService, GetPostService, ListCategoriesService, ListPostsService, ReactionService,
    ToggleCommentActiveService, UpdatePostService,
};
use crate::blog::application::BlogUseCases;
use crate::profile::application::ports::incoming::use_cases::{
    CreateProfileUseCase, GetProfileUseCase, UpdateProfileUseCase,
};
use crate::profile::application::ProfileUseCases;
use crate::tests::support::blog_fakes::{InMemoryBlog, InMemoryLedger};
use crate::tests::support::fakes::{
    FakePasswordHasher, FakeTokenProvider, InMemoryBlacklist, InMemoryTokenRepository,
    InMemoryUserStore, RecordingNotifier, SequenceGenerator,
};
use crate::tests::support::stubs::{
    StubCreateProfileUseCase, StubGetProfileUseCase, StubUpdateProfileUseCase,
};
use crate::AppState;

/// Builds an `AppState` for route tests.
///
/// Accounts and blog slots default to real services over empty in-memory
/// stores; profile slots default to stubs. Tests swap in what they exercise.
pub struct TestAppStateBuilder {
    accounts: AccountUseCases,
    profile: ProfileUseCases,
    blog: BlogUseCases,
}

fn default_accounts() -> AccountUseCases {
    let store = InMemoryUserStore::default();
    let issuer = TokenIssuer::new(
        Arc::new(InMemoryTokenRepository::default()),
        Arc::new(SequenceGenerator::new(&[])),
    );
    let notifier = Arc::new(RecordingNotifier::default());

    let create_user = CreateUserUseCase::new(
        store.clone(),
        store.clone(),
        Arc::new(FakePasswordHasher),
        Arc::new(BasicPasswordPolicy),
    );

    AccountUseCases {
        register: Arc::new(UserRegistrationOrchestrator::new(
            Arc::new(create_user),
            issuer.clone(),
            notifier.clone(),
        )),
        activate: Arc::new(ActivateAccountUseCase::new(
            store.clone(),
            store.clone(),
            issuer.clone(),
        )),
        request_reactivation: Arc::new(RequestReactivationUseCase::new(
            store.clone(),
            issuer.clone(),
            notifier.clone(),
        )),
        login: Arc::new(LoginUserUseCase::new(
            store.clone(),
            Arc::new(FakePasswordHasher),
            Arc::new(FakeTokenProvider),
        )),
        logout: Arc::new(LogoutUseCase::new(
            Arc::new(InMemoryBlacklist::default()),
            Arc::new(FakeTokenProvider),
        )),
        request_password_reset: Arc::new(RequestPasswordResetUseCase::new(
            store.clone(),
            issuer.clone(),
            notifier,
        )),
        reset_password: Arc::new(ResetPasswordUseCase::new(
            store.clone(),
            store,
            issuer,
            Arc::new(FakePasswordHasher),
            Arc::new(BasicPasswordPolicy),
        )),
    }
}

fn default_blog() -> BlogUseCases {
    let blog = InMemoryBlog::default();

    BlogUseCases {
        list_categories: Arc::new(ListCategoriesService::new(blog.clone())),
        create_category: Arc::new(CreateCategoryService::new(blog.clone())),
        list_posts: Arc::new(ListPostsService::new(blog.clone())),
        get_post: Arc::new(GetPostService::new(
            blog.clone(),
            blog.clone(),
            InMemoryLedger::<PostTarget>::default(),
        )),
        create_post: Arc::new(CreatePostService::new(
            blog.clone(),
            blog.clone(),
            blog.clone(),
        )),
        update_post: Arc::new(UpdatePostService::new(
            blog.clone(),
            blog.clone(),
            blog.clone(),
        )),
        delete_post: Arc::new(DeletePostService::new(blog.clone(), blog.clone())),
        add_comment: Arc::new(AddCommentService::new(blog.clone(), blog.clone())),
        delete_comment: Arc::new(DeleteCommentService::new(blog.clone())),
        toggle_comment: Arc::new(ToggleCommentActiveService::new(blog)),
        post_reactions: Arc::new(ReactionService::<PostTarget, _>::new(
            InMemoryLedger::<PostTarget>::default(),
        )),
        comment_reactions: Arc::new(ReactionService::<CommentTarget, _>::new(
            InMemoryLedger::<CommentTarget>::default(),
        )),
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            accounts: default_accounts(),
            profile: ProfileUseCases {
                create: Arc::new(StubCreateProfileUseCase),
                get: Arc::new(StubGetProfileUseCase),
                update: Arc::new(StubUpdateProfileUseCase),
            },
            blog: default_blog(),
        }
    }
}

impl TestAppStateBuilder {
    // ---- accounts ----

    pub fn with_register(mut self, orchestrator: UserRegistrationOrchestrator) -> Self {
        self.accounts.register = Arc::new(orchestrator);
        self
    }

    pub fn with_activate(mut self, use_case: impl IActivateAccountUseCase + 'static) -> Self {
        self.accounts.activate = Arc::new(use_case);
        self
    }

    pub fn with_request_reactivation(
        mut self,
        use_case: impl IRequestReactivationUseCase + 'static,
    ) -> Self {
        self.accounts.request_reactivation = Arc::new(use_case);
        self
    }

    pub fn with_login(mut self, use_case: impl ILoginUserUseCase + 'static) -> Self {
        self.accounts.login = Arc::new(use_case);
        self
    }

    pub fn with_logout(mut self, use_case: impl ILogoutUseCase + 'static) -> Self {
        self.accounts.logout = Arc::new(use_case);
        self
    }

    pub fn with_request_password_reset(
        mut self,
        use_case: impl IRequestPasswordResetUseCase + 'static,
    ) -> Self {
        self.accounts.request_password_reset = Arc::new(use_case);
        self
    }

    pub fn with_reset_password(mut self, use_case: impl IResetPasswordUseCase + 'static) -> Self {
        self.accounts.reset_password = Arc::new(use_case);
        self
    }

    // ---- profiles ----

    pub fn with_create_profile(mut self, use_case: impl CreateProfileUseCase + 'static) -> Self {
        self.profile.create = Arc::new(use_case);
        self
    }

    pub fn with_get_profile(mut self, use_case: impl GetProfileUseCase + 'static) -> Self {
        self.profile.get = Arc::new(use_case);
        self
    }

    pub fn with_update_profile(mut self, use_case: impl UpdateProfileUseCase + 'static) -> Self {
        self.profile.update = Arc::new(use_case);
        self
    }

    // ---- blog ----

    pub fn with_list_categories(mut self, use_case: impl ListCategoriesUseCase + 'static) -> Self {
        self.blog.list_categories = Arc::new(use_case);
        self
    }

    pub fn with_create_category(mut self, use_case: impl CreateCategoryUseCase + 'static) -> Self {
        self.blog.create_category = Arc::new(use_case);
        self
    }

    pub fn with_list_posts(mut self, use_case: impl ListPostsUseCase + 'static) -> Self {
        self.blog.list_posts = Arc::new(use_case);
        self
    }

    pub fn with_get_post(mut self, use_case: impl GetPostUseCase + 'static) -> Self {
        self.blog.get_post = Arc::new(use_case);
        self
    }

    pub fn with_create_post(mut self, use_case: impl CreatePostUseCase + 'static) -> Self {
        self.blog.create_post = Arc::new(use_case);
        self
    }

    pub fn with_update_post(mut self, use_case: impl UpdatePostUseCase + 'static) -> Self {
        self.blog.update_post = Arc::new(use_case);
        self
    }

    pub fn with_delete_post(mut self, use_case: impl DeletePostUseCase + 'static) -> Self {
        self.blog.delete_post = Arc::new(use_case);
        self
    }

    pub fn with_add_comment(mut self, use_case: impl AddCommentUseCase + 'static) -> Self {
        self.blog.add_comment = Arc::new(use_case);
        self
    }

    pub fn with_delete_comment(mut self, use_case: impl DeleteCommentUseCase + 'static) -> Self {
        self.blog.delete_comment = Arc::new(use_case);
        self
    }

    pub fn with_toggle_comment(
        mut self,
        use_case: impl ToggleCommentActiveUseCase + 'static,
    ) -> Self {
        self.blog.toggle_comment = Arc::new(use_case);
        self
    }

    pub fn with_post_reactions(mut self, use_case: impl ReactionUseCase + 'static) -> Self {
        self.blog.post_reactions = Arc::new(use_case);
        self
    }

    pub fn with_comment_reactions(mut self, use_case: impl ReactionUseCase + 'static) -> Self {
        self.blog.comment_reactions = Arc::new(use_case);
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            accounts: self.accounts,
            profile: self.profile,
            blog: self.blog,
        })
    }
}
