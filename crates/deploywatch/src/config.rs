use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use deploywatch_cloudflare::PagesConfig;
use deploywatch_cloudflare::pages::CLOUDFLARE_API_BASE;
use deploywatch_core::{DeploymentIdentity, PollConfig};
use deploywatch_github::{GITHUB_API_BASE, GithubConfig};
use std::time::Duration;

/// コマンドライン引数（すべて環境変数からも読み込める）
#[derive(Parser, Debug)]
#[command(name = "deploywatch", version)]
#[command(about = "Cloudflare Pages のデプロイ状況を GitHub Deployment に同期する", long_about = None)]
pub struct Cli {
    /// デプロイ対象のコミットSHA
    #[arg(long, env = "INPUT_COMMIT_HASH", value_parser = NonEmptyStringValueParser::new())]
    pub commit_hash: String,

    /// GitHub Deployment ID
    #[arg(long, env = "INPUT_GITHUB_DEPLOYMENT_ID", value_parser = NonEmptyStringValueParser::new())]
    pub github_deployment_id: String,

    /// リポジトリ (owner/repo)
    #[arg(long, env = "INPUT_GITHUB_REPOSITORY", value_parser = NonEmptyStringValueParser::new())]
    pub github_repository: String,

    /// Cloudflare Pages プロジェクト名
    #[arg(long, env = "INPUT_CLOUDFLARE_PROJECT_NAME", value_parser = NonEmptyStringValueParser::new())]
    pub cloudflare_project_name: String,

    /// GitHub トークン
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, value_parser = NonEmptyStringValueParser::new())]
    pub github_token: String,

    /// Cloudflare アカウントID
    #[arg(long, env = "CLOUDFLARE_ACCOUNT_ID", value_parser = NonEmptyStringValueParser::new())]
    pub cloudflare_account_id: String,

    /// Cloudflare API トークン
    #[arg(long, env = "CLOUDFLARE_API_TOKEN", hide_env_values = true, value_parser = NonEmptyStringValueParser::new())]
    pub cloudflare_api_token: String,

    /// GitHub Deployment の環境名
    #[arg(long, env = "INPUT_ENVIRONMENT", default_value = PollConfig::DEFAULT_ENVIRONMENT, value_parser = NonEmptyStringValueParser::new())]
    pub environment: String,

    /// ポーリング間隔（秒）
    #[arg(long, env = "INPUT_POLL_INTERVAL", value_name = "SECONDS", default_value_t = PollConfig::DEFAULT_POLL_INTERVAL_SECS)]
    pub poll_interval: u64,

    /// 最大ポーリング回数
    #[arg(
        long,
        env = "INPUT_MAX_ATTEMPTS",
        default_value_t = PollConfig::DEFAULT_MAX_ATTEMPTS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_attempts: u32,

    /// GitHub API のベースURL（GitHub Enterprise 用）
    #[arg(long, env = "GITHUB_API_URL", default_value = GITHUB_API_BASE)]
    pub github_api_url: String,

    /// Cloudflare API のベースURL
    #[arg(long, env = "CLOUDFLARE_API_URL", default_value = CLOUDFLARE_API_BASE)]
    pub cloudflare_api_url: String,
}

impl Cli {
    pub fn identity(&self) -> DeploymentIdentity {
        DeploymentIdentity::new(
            &self.cloudflare_project_name,
            &self.commit_hash,
            &self.github_deployment_id,
        )
    }

    pub fn poll_config(&self) -> PollConfig {
        PollConfig::new(
            Duration::from_secs(self.poll_interval),
            self.max_attempts,
            &self.environment,
        )
    }

    pub fn pages_config(&self) -> PagesConfig {
        PagesConfig::new(&self.cloudflare_account_id, &self.cloudflare_api_token)
            .with_api_base(&self.cloudflare_api_url)
    }

    pub fn github_config(&self) -> deploywatch_github::Result<GithubConfig> {
        Ok(GithubConfig::new(
            &self.github_repository,
            &self.github_deployment_id,
            &self.github_token,
        )?
        .with_api_base(&self.github_api_url))
    }
}
