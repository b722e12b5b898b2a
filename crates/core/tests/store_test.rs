use codebrew_core::models::account::LinkedAccount;
use codebrew_core::store::{KeyValueStore, MemoryStore};
use pretty_assertions::assert_eq;

#[test]
fn test_set_then_get() {
    tokio_test::block_on(async {
        let store: MemoryStore<u64, String> = MemoryStore::new();

        store.set(1, "one".to_string()).await.unwrap();

        assert_eq!(store.get(&1).await.unwrap(), Some("one".to_string()));
        assert_eq!(store.get(&2).await.unwrap(), None);
    });
}

#[test]
fn test_second_link_wins() {
    tokio_test::block_on(async {
        let store: MemoryStore<u64, LinkedAccount> = MemoryStore::new();

        store.set(5, LinkedAccount::new(5, "First")).await.unwrap();
        store.set(5, LinkedAccount::new(5, "Second")).await.unwrap();

        assert_eq!(store.get(&5).await.unwrap().unwrap().ign, "Second");
    });
}

#[test]
fn test_delete_returns_previous_value() {
    tokio_test::block_on(async {
        let store: MemoryStore<u64, String> = MemoryStore::default();
        store.set(3, "three".to_string()).await.unwrap();

        assert_eq!(store.delete(&3).await.unwrap(), Some("three".to_string()));
        assert_eq!(store.delete(&3).await.unwrap(), None);
        assert_eq!(store.get(&3).await.unwrap(), None);
    });
}

#[test]
fn test_usable_as_trait_object() {
    tokio_test::block_on(async {
        let store: Box<dyn KeyValueStore<u64, String>> = Box::new(MemoryStore::new());

        store.set(8, "eight".to_string()).await.unwrap();

        assert_eq!(store.get(&8).await.unwrap(), Some("eight".to_string()));
    });
}
