/// One customer: who it is, when it arrived and how long it will hold the
/// server once admitted.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Request {
    id: u64,
    arrival_time: f64,
    service_time: f64,
}

impl Request {
    pub fn new (id: u64, arrival_time: f64, service_time: f64) -> Self {
        Request {
            id,
            arrival_time,
            service_time,
        }
    }

    pub fn get_id(&self) -> u64 {
        self.id
    }

    pub fn get_arrival_time(&self) -> f64 {
        self.arrival_time
    }

    pub fn get_service_time(&self) -> f64 {
        self.service_time
    }
}
