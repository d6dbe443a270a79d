use contracts::domain::common::ListEntity;

use super::error::{message_from_body, DecodeError, FetchError};
use super::resource::Resource;
use super::store::dedup_by_id;
use super::transport::HttpTransport;

/// Результат загрузки коллекции
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport<E> {
    pub items: Vec<E>,
    /// Записи, не прошедшие проверку схемы
    pub dropped: Vec<DecodeError>,
    /// Повторы id (оставлено первое вхождение)
    pub duplicates: usize,
}

impl<E> LoadReport<E> {
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }
}

/// Загрузить всю коллекцию ресурса.
///
/// Каждая запись разбирается отдельно: битые записи отбрасываются
/// и попадают в отчёт, остальные сохраняют порядок ответа.
pub async fn load<R, T>(transport: &T) -> Result<LoadReport<R::Entity>, FetchError>
where
    R: Resource,
    T: HttpTransport,
{
    let list_name = <R::Entity as ListEntity>::list_name();
    let response = transport.send(R::list_request()).await.map_err(|e| {
        log::error!("{}: load failed: {}", list_name, e);
        FetchError::from(e)
    })?;

    if !response.is_success() {
        let error = FetchError::Status {
            status: response.status,
            message: message_from_body(&response),
        };
        log::error!("{}: {}", list_name, error);
        return Err(error);
    }

    let raw: Vec<serde_json::Value> = response.json().map_err(|e| {
        log::error!("{}: {}", list_name, e);
        FetchError::from(e)
    })?;

    let mut items = Vec::with_capacity(raw.len());
    let mut dropped = Vec::new();
    for (index, record) in raw.into_iter().enumerate() {
        match R::decode(record) {
            Ok(entity) => items.push(entity),
            Err(e) => {
                let error = DecodeError {
                    index,
                    message: e.to_string(),
                };
                log::warn!("{}: dropped {}", list_name, error);
                dropped.push(error);
            }
        }
    }
    let duplicates = dedup_by_id(&mut items);
    if duplicates > 0 {
        log::warn!("{}: {} duplicate id(s) ignored", list_name, duplicates);
    }

    log::info!(
        "{}: loaded {} record(s), dropped {}",
        list_name,
        items.len(),
        dropped.len()
    );

    Ok(LoadReport {
        items,
        dropped,
        duplicates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::entity_editor::store::testing::Person;
    use crate::shared::entity_editor::testing::PeopleResource;
    use crate::shared::entity_editor::transport::testing::ScriptedTransport;
    use crate::shared::entity_editor::transport::Method;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_load_drops_invalid_records_and_duplicates() {
        let t = ScriptedTransport::new();
        t.reply_json(
            200,
            json!([
                {"id": 1, "name": "Alice", "dept": "HR"},
                {"id": 2, "dept": "IT"},
                {"id": 3, "name": "Carol", "dept": "IT"},
                {"id": 1, "name": "Alice again", "dept": "HR"}
            ]),
        );

        let report = block_on(load::<PeopleResource, _>(&t)).unwrap();
        let ids: Vec<i64> = report.items.iter().map(|p: &Person| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(report.dropped_count(), 1);
        assert_eq!(report.dropped[0].index, 1);
        assert_eq!(report.duplicates, 1);

        let sent = t.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::Get);
        assert_eq!(sent[0].path, "/api/people");
    }

    #[test]
    fn test_load_status_error_carries_message() {
        let t = ScriptedTransport::new();
        t.reply_json(503, json!({"message": "maintenance"}));
        let err = block_on(load::<PeopleResource, _>(&t)).unwrap_err();
        assert_eq!(
            err,
            FetchError::Status {
                status: 503,
                message: "maintenance".into()
            }
        );
    }

    #[test]
    fn test_load_rejects_non_json_and_non_array() {
        let t = ScriptedTransport::new();
        t.reply_text(200, "text/html", "<html/>");
        t.reply_json(200, json!({"items": []}));
        assert!(matches!(
            block_on(load::<PeopleResource, _>(&t)),
            Err(FetchError::Unexpected(_))
        ));
        assert!(matches!(
            block_on(load::<PeopleResource, _>(&t)),
            Err(FetchError::Unexpected(_))
        ));
    }

    #[test]
    fn test_load_network_failure() {
        let t = ScriptedTransport::new();
        assert!(matches!(
            block_on(load::<PeopleResource, _>(&t)),
            Err(FetchError::Transport(_))
        ));
    }
}
