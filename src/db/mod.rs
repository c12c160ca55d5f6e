//! Database Connection Management Module
//!
//! MongoDB 연결을 생성하고 리포지토리에 데이터베이스 핸들을 제공합니다.
//! 인덱스 생성은 각 리포지토리의 `create_indexes`가 담당하며,
//! 조립 루트가 시작 시 순서대로 호출합니다.
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! use crate::config::DatabaseConfig;
//! use crate::db::Database;
//!
//! let database = Database::connect(&DatabaseConfig::uri(), &DatabaseConfig::database_name()).await?;
//! let users = database.get_database().collection::<User>("users");
//! ```

use log::info;
use mongodb::{Client, options::ClientOptions};

/// MongoDB 데이터베이스 연결 래퍼
#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// 주어진 URI로 연결하고 `ping` 명령으로 연결 상태를 확인합니다.
    pub async fn connect(uri: &str, database_name: &str) -> Result<Self, mongodb::error::Error> {
        let mut client_options = ClientOptions::parse(uri).await?;
        client_options.app_name = Some("stash_backend".to_string());

        let client = Client::with_options(client_options)?;

        client
            .database(database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", database_name);

        Ok(Self {
            client,
            database_name: database_name.to_string(),
        })
    }

    /// 리포지토리가 컬렉션에 접근할 때 사용하는 데이터베이스 핸들
    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}
