use commission_engine::application::engine::evaluate;
use commission_engine::domain::config::CommissionConfig;
use commission_engine::domain::context::{GuildRank, UserContext};
use commission_engine::domain::money::Rate;
use commission_engine::domain::ports::ConfigSourceBox;
use commission_engine::infrastructure::in_memory::InMemoryConfigSource;
use commission_engine::infrastructure::json_file::JsonFileConfigSource;
use rust_decimal_macros::dec;

mod common;

#[tokio::test]
async fn test_sources_as_trait_objects() {
    let sources: Vec<ConfigSourceBox> = vec![
        Box::new(JsonFileConfigSource::new(common::CONFIG_FIXTURE)),
        Box::new(InMemoryConfigSource::new(common::fixture_config())),
    ];

    // Verify Send + Sync by loading from spawned tasks
    let mut handles = Vec::new();
    for source in sources {
        handles.push(tokio::spawn(async move { source.load().await.unwrap() }));
    }

    let mut loaded: Vec<CommissionConfig> = Vec::new();
    for handle in handles {
        loaded.push(handle.await.unwrap());
    }

    assert_eq!(loaded[0], loaded[1]);

    let context = UserContext {
        guild_rank: GuildRank::Top1,
        ..UserContext::simulator_defaults()
    };
    for config in &loaded {
        assert_eq!(
            evaluate(config, &context).final_commission_rate,
            Rate::new(dec!(0.90))
        );
    }
}
