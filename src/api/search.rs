//! Read-only queries: platforms, projects, repositories and users.

use crate::builder::Arguments;
use crate::catalog::{ArgKey, SearchOperation, SearchQuery};
use crate::error::Result;
use crate::paginator::Paginator;
use crate::params::RequestOptions;
use crate::response::Outcome;
use crate::session::{Call, Session};

use super::{call_once, paginate};

fn project_args(platform: &str, project: &str) -> Arguments {
    Arguments::new()
        .with(ArgKey::Platform, platform)
        .with(ArgKey::Project, project)
}

fn repository_args(host: &str, owner: &str, repo: &str) -> Arguments {
    Arguments::new()
        .with(ArgKey::Host, host)
        .with(ArgKey::Owner, owner)
        .with(ArgKey::Repo, repo)
}

fn user_args(host: &str, user: &str) -> Arguments {
    Arguments::new()
        .with(ArgKey::Host, host)
        .with(ArgKey::User, user)
}

fn search_call(op: SearchOperation, arguments: Arguments, options: RequestOptions) -> Call<SearchOperation> {
    Call::get(op).with_arguments(arguments).with_options(options)
}

/// Search facade over libraries.io.
///
/// # Example
///
/// ```no_run
/// use librariesio::{RequestOptions, Search};
///
/// # async fn example() -> librariesio::Result<()> {
/// let search = Search::from_env()?;
/// let outcome = search.project("pypi", "requests", RequestOptions::default()).await?;
/// if let Some(project) = outcome.response() {
///     println!("{:?}", project.as_single().and_then(|p| p.get("stars")));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Search {
    session: Session,
}

impl Search {
    /// Create a facade with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be created.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self::with_session(Session::new(api_key)?))
    }

    /// Create a facade configured from the environment.
    ///
    /// # Errors
    ///
    /// See [`Session::from_env`].
    pub fn from_env() -> Result<Self> {
        Ok(Self::with_session(Session::from_env()?))
    }

    /// Wrap an existing session. The session kind is checked on every call.
    pub fn with_session(session: Session) -> Self {
        Self { session }
    }

    /// The underlying session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable access to the session, to swap the key or retry policy.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Run any search operation with loosely-bound arguments.
    ///
    /// # Errors
    ///
    /// Returns configuration errors; request failures are captured in the
    /// [`Outcome`].
    #[tracing::instrument(skip(self, arguments, query, options))]
    pub async fn call(
        &self,
        op: SearchOperation,
        arguments: Arguments,
        query: SearchQuery,
        options: RequestOptions,
    ) -> Result<Outcome> {
        call_once(&self.session, search_call(op, arguments, options).with_query(query)).await
    }

    /// Paginate any collection search operation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LibrariesError::InvalidOperation`] for non-collection
    /// operations.
    pub fn pages(
        &self,
        op: SearchOperation,
        arguments: Arguments,
        query: SearchQuery,
        options: RequestOptions,
    ) -> Result<Paginator<SearchOperation>> {
        paginate(&self.session, search_call(op, arguments, options).with_query(query))
    }

    /// Supported package managers.
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    #[tracing::instrument(skip(self, options))]
    pub async fn platforms(&self, options: RequestOptions) -> Result<Outcome> {
        call_once(&self.session, search_call(SearchOperation::Platforms, Arguments::new(), options)).await
    }

    /// A project and its versions.
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    #[tracing::instrument(skip(self, options))]
    pub async fn project(&self, platform: &str, project: &str, options: RequestOptions) -> Result<Outcome> {
        let args = project_args(platform, project);
        call_once(&self.session, search_call(SearchOperation::Project, args, options)).await
    }

    /// Dependencies of a project version; `None` means the latest version.
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    #[tracing::instrument(skip(self, options))]
    pub async fn project_dependencies(
        &self,
        platform: &str,
        project: &str,
        version: Option<&str>,
        options: RequestOptions,
    ) -> Result<Outcome> {
        let mut args = project_args(platform, project);
        if let Some(version) = version {
            args.insert(ArgKey::Version, version);
        }
        call_once(&self.session, search_call(SearchOperation::ProjectDependencies, args, options)).await
    }

    /// Projects with at least one version depending on the project.
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    #[tracing::instrument(skip(self, options))]
    pub async fn project_dependents(&self, platform: &str, project: &str, options: RequestOptions) -> Result<Outcome> {
        let args = project_args(platform, project);
        call_once(&self.session, search_call(SearchOperation::ProjectDependents, args, options)).await
    }

    /// Paginated [`Search::project_dependents`].
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    pub fn project_dependents_pages(
        &self,
        platform: &str,
        project: &str,
        options: RequestOptions,
    ) -> Result<Paginator<SearchOperation>> {
        let args = project_args(platform, project);
        paginate(&self.session, search_call(SearchOperation::ProjectDependents, args, options))
    }

    /// Repositories depending on the project.
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    #[tracing::instrument(skip(self, options))]
    pub async fn project_dependent_repositories(
        &self,
        platform: &str,
        project: &str,
        options: RequestOptions,
    ) -> Result<Outcome> {
        let args = project_args(platform, project);
        call_once(&self.session, search_call(SearchOperation::ProjectDependentRepositories, args, options)).await
    }

    /// Paginated [`Search::project_dependent_repositories`].
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    pub fn project_dependent_repositories_pages(
        &self,
        platform: &str,
        project: &str,
        options: RequestOptions,
    ) -> Result<Paginator<SearchOperation>> {
        let args = project_args(platform, project);
        paginate(&self.session, search_call(SearchOperation::ProjectDependentRepositories, args, options))
    }

    /// Users who contributed to the project's repository.
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    #[tracing::instrument(skip(self, options))]
    pub async fn project_contributors(&self, platform: &str, project: &str, options: RequestOptions) -> Result<Outcome> {
        let args = project_args(platform, project);
        call_once(&self.session, search_call(SearchOperation::ProjectContributors, args, options)).await
    }

    /// Paginated [`Search::project_contributors`].
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    pub fn project_contributors_pages(
        &self,
        platform: &str,
        project: &str,
        options: RequestOptions,
    ) -> Result<Paginator<SearchOperation>> {
        let args = project_args(platform, project);
        paginate(&self.session, search_call(SearchOperation::ProjectContributors, args, options))
    }

    /// SourceRank breakdown.
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    #[tracing::instrument(skip(self, options))]
    pub async fn project_sourcerank(&self, platform: &str, project: &str, options: RequestOptions) -> Result<Outcome> {
        let args = project_args(platform, project);
        call_once(&self.session, search_call(SearchOperation::ProjectSourcerank, args, options)).await
    }

    /// Usage counts per version requirement.
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    #[tracing::instrument(skip(self, options))]
    pub async fn project_usage(&self, platform: &str, project: &str, options: RequestOptions) -> Result<Outcome> {
        let args = project_args(platform, project);
        call_once(&self.session, search_call(SearchOperation::ProjectUsage, args, options)).await
    }

    /// Free-text project search with optional sort and filters.
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    #[tracing::instrument(skip(self, options))]
    pub async fn project_search(&self, query: SearchQuery, options: RequestOptions) -> Result<Outcome> {
        let call = search_call(SearchOperation::ProjectSearch, Arguments::new(), options).with_query(query);
        call_once(&self.session, call).await
    }

    /// Paginated [`Search::project_search`].
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    pub fn project_search_pages(
        &self,
        query: SearchQuery,
        options: RequestOptions,
    ) -> Result<Paginator<SearchOperation>> {
        let call = search_call(SearchOperation::ProjectSearch, Arguments::new(), options).with_query(query);
        paginate(&self.session, call)
    }

    /// A repository.
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    #[tracing::instrument(skip(self, options))]
    pub async fn repository(&self, host: &str, owner: &str, repo: &str, options: RequestOptions) -> Result<Outcome> {
        let args = repository_args(host, owner, repo);
        call_once(&self.session, search_call(SearchOperation::Repository, args, options)).await
    }

    /// Dependencies declared by a repository's manifests.
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    #[tracing::instrument(skip(self, options))]
    pub async fn repository_dependencies(
        &self,
        host: &str,
        owner: &str,
        repo: &str,
        options: RequestOptions,
    ) -> Result<Outcome> {
        let args = repository_args(host, owner, repo);
        call_once(&self.session, search_call(SearchOperation::RepositoryDependencies, args, options)).await
    }

    /// Packages referencing a repository.
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    #[tracing::instrument(skip(self, options))]
    pub async fn repository_projects(
        &self,
        host: &str,
        owner: &str,
        repo: &str,
        options: RequestOptions,
    ) -> Result<Outcome> {
        let args = repository_args(host, owner, repo);
        call_once(&self.session, search_call(SearchOperation::RepositoryProjects, args, options)).await
    }

    /// Paginated [`Search::repository_projects`].
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    pub fn repository_projects_pages(
        &self,
        host: &str,
        owner: &str,
        repo: &str,
        options: RequestOptions,
    ) -> Result<Paginator<SearchOperation>> {
        let args = repository_args(host, owner, repo);
        paginate(&self.session, search_call(SearchOperation::RepositoryProjects, args, options))
    }

    /// A user or organisation.
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    #[tracing::instrument(skip(self, options))]
    pub async fn user(&self, host: &str, user: &str, options: RequestOptions) -> Result<Outcome> {
        call_once(&self.session, search_call(SearchOperation::User, user_args(host, user), options)).await
    }

    /// Repositories owned by a user.
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    #[tracing::instrument(skip(self, options))]
    pub async fn user_repositories(&self, host: &str, user: &str, options: RequestOptions) -> Result<Outcome> {
        let args = user_args(host, user);
        call_once(&self.session, search_call(SearchOperation::UserRepositories, args, options)).await
    }

    /// Paginated [`Search::user_repositories`].
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    pub fn user_repositories_pages(
        &self,
        host: &str,
        user: &str,
        options: RequestOptions,
    ) -> Result<Paginator<SearchOperation>> {
        paginate(&self.session, search_call(SearchOperation::UserRepositories, user_args(host, user), options))
    }

    /// Packages referencing a user's repositories.
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    #[tracing::instrument(skip(self, options))]
    pub async fn user_packages(&self, host: &str, user: &str, options: RequestOptions) -> Result<Outcome> {
        call_once(&self.session, search_call(SearchOperation::UserPackages, user_args(host, user), options)).await
    }

    /// Paginated [`Search::user_packages`].
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    pub fn user_packages_pages(
        &self,
        host: &str,
        user: &str,
        options: RequestOptions,
    ) -> Result<Paginator<SearchOperation>> {
        paginate(&self.session, search_call(SearchOperation::UserPackages, user_args(host, user), options))
    }

    /// Packages a user has contributed to.
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    #[tracing::instrument(skip(self, options))]
    pub async fn user_packages_contributions(
        &self,
        host: &str,
        user: &str,
        options: RequestOptions,
    ) -> Result<Outcome> {
        let args = user_args(host, user);
        call_once(&self.session, search_call(SearchOperation::UserPackagesContributions, args, options)).await
    }

    /// Paginated [`Search::user_packages_contributions`].
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    pub fn user_packages_contributions_pages(
        &self,
        host: &str,
        user: &str,
        options: RequestOptions,
    ) -> Result<Paginator<SearchOperation>> {
        let args = user_args(host, user);
        paginate(&self.session, search_call(SearchOperation::UserPackagesContributions, args, options))
    }

    /// Repositories a user has contributed to.
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    #[tracing::instrument(skip(self, options))]
    pub async fn user_repository_contributions(
        &self,
        host: &str,
        user: &str,
        options: RequestOptions,
    ) -> Result<Outcome> {
        let args = user_args(host, user);
        call_once(&self.session, search_call(SearchOperation::UserRepositoryContributions, args, options)).await
    }

    /// Paginated [`Search::user_repository_contributions`].
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    pub fn user_repository_contributions_pages(
        &self,
        host: &str,
        user: &str,
        options: RequestOptions,
    ) -> Result<Paginator<SearchOperation>> {
        let args = user_args(host, user);
        paginate(&self.session, search_call(SearchOperation::UserRepositoryContributions, args, options))
    }

    /// Unique dependencies across a user's repositories.
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    #[tracing::instrument(skip(self, options))]
    pub async fn user_dependencies(&self, host: &str, user: &str, options: RequestOptions) -> Result<Outcome> {
        let args = user_args(host, user);
        call_once(&self.session, search_call(SearchOperation::UserDependencies, args, options)).await
    }

    /// Paginated [`Search::user_dependencies`].
    ///
    /// # Errors
    ///
    /// Returns configuration errors only.
    pub fn user_dependencies_pages(
        &self,
        host: &str,
        user: &str,
        options: RequestOptions,
    ) -> Result<Paginator<SearchOperation>> {
        paginate(&self.session, search_call(SearchOperation::UserDependencies, user_args(host, user), options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LibrariesError;
    use crate::session::SessionKind;

    fn iterator_only() -> Session {
        Session::builder()
            .api_key("k")
            .base_url("http://127.0.0.1:9/api")
            .kind(SessionKind::IteratorOnly)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_iterator_only_session_is_rejected() {
        let search = Search::with_session(iterator_only());
        let err = search.platforms(RequestOptions::default()).await.unwrap_err();
        assert!(matches!(err, LibrariesError::InvalidSessionClass { .. }));

        let err = search
            .project_search_pages(SearchQuery::text("x"), RequestOptions::default())
            .unwrap_err();
        assert!(matches!(err, LibrariesError::InvalidSessionClass { .. }));
    }

    #[tokio::test]
    async fn test_missing_argument_propagates() {
        let search = Search::with_session(Session::new("k").unwrap());
        let err = search
            .project("pypi", "", RequestOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LibrariesError::MissingArgument("project")));
    }

    #[test]
    fn test_pages_rejects_singleton() {
        let search = Search::with_session(Session::new("k").unwrap());
        let err = search
            .pages(
                SearchOperation::Repository,
                repository_args("github", "a", "b"),
                SearchQuery::default(),
                RequestOptions::default(),
            )
            .unwrap_err();
        assert!(matches!(err, LibrariesError::InvalidOperation { .. }));
    }
}
