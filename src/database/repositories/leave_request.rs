use crate::database::{
    Database,
    models::{LeaveRequest, LeaveStatus},
};

#[derive(Clone)]
pub struct LeaveRequestRepository {
    database: Database,
}

impl LeaveRequestRepository {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// A user's own requests, most recently applied first.
    pub async fn find_by_user(&self, user_id: &str) -> Vec<LeaveRequest> {
        let tables = self.database.read().await;
        let mut requests: Vec<LeaveRequest> = tables
            .leave_requests
            .iter()
            .filter(|request| request.user_id == user_id)
            .cloned()
            .collect();

        requests.sort_by(|a, b| b.applied_on.cmp(&a.applied_on));
        requests
    }

    /// Pending requests owned by users who currently report to `manager_id`.
    pub async fn find_pending_for_manager(&self, manager_id: &str) -> Vec<LeaveRequest> {
        let tables = self.database.read().await;
        let mut requests: Vec<LeaveRequest> = tables
            .leave_requests
            .iter()
            .filter(|request| request.status == LeaveStatus::Pending)
            .filter(|request| {
                tables
                    .user(&request.user_id)
                    .is_some_and(|owner| owner.reports_to(manager_id))
            })
            .cloned()
            .collect();

        requests.sort_by(|a, b| a.applied_on.cmp(&b.applied_on));
        requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::seed;

    fn repo() -> LeaveRequestRepository {
        LeaveRequestRepository::new(Database::new(seed::baseline()))
    }

    #[actix_web::test]
    async fn user_requests_are_newest_first() {
        let requests = repo().find_by_user("emp1").await;

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].id, "leave_emp1_1721999800");
        assert_eq!(requests[1].id, "leave_emp1_1721989800");
    }

    #[actix_web::test]
    async fn pending_queue_follows_the_current_manager() {
        let repo = repo();

        let queue = repo.find_pending_for_manager("mgr1").await;
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].status, LeaveStatus::Pending);

        assert!(repo.find_pending_for_manager("adm1").await.is_empty());
    }
}
