use crate::models::{ClassSummary, DomainCount, StudentChallengeCount, StudentRecord};

pub fn summarize(records: &[StudentRecord]) -> ClassSummary {
    let mut counts: Vec<DomainCount> = Vec::new();

    for domain in records.iter().flat_map(|record| record.challenges.iter()) {
        match counts.iter_mut().find(|entry| entry.domain == *domain) {
            Some(entry) => entry.count += 1,
            None => counts.push(DomainCount {
                domain: *domain,
                count: 1,
            }),
        }
    }

    let students = records
        .iter()
        .map(|record| StudentChallengeCount {
            id: record.id.clone(),
            challenge_count: record.challenge_count,
        })
        .collect();

    ClassSummary { counts, students }
}

impl ClassSummary {
    /// Counts by descending frequency, ties in tracked domain order.
    pub fn ranked(&self) -> Vec<DomainCount> {
        let mut ranked = self.counts.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count).then(a.domain.cmp(&b.domain)));
        ranked
    }

    pub fn total_occurrences(&self) -> usize {
        self.counts.iter().map(|entry| entry.count).sum()
    }
}
