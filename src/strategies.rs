use crate::challenges::Domain;

/// Suggested interventions for one domain, by context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainStrategy {
    pub school: &'static str,
    pub home: &'static str,
    pub tech: &'static str,
    pub emotional: &'static str,
}

impl DomainStrategy {
    pub fn contexts(&self) -> [(&'static str, &'static str); 4] {
        [
            ("בית הספר", self.school),
            ("בית", self.home),
            ("טכנולוגיה", self.tech),
            ("רגשי", self.emotional),
        ]
    }
}

const FALLBACK: DomainStrategy = DomainStrategy {
    school: "התאמה אישית לפי צורך.",
    home: "-",
    tech: "-",
    emotional: "-",
};

pub fn strategy_for(domain: Domain) -> DomainStrategy {
    match domain {
        Domain::Language => DomainStrategy {
            school: "הטרמת אוצר מילים...",
            home: "קריאה משותפת...",
            tech: "אפליקציות להקראה",
            emotional: "חיזוק על מאמץ",
        },
        Domain::Math => DomainStrategy {
            school: "שימוש באמצעי המחשה...",
            home: "שילוב בחיי היומיום",
            tech: "אפליקציות משחקיות",
            emotional: "נטרול חרדת מתמטיקה",
        },
        Domain::Attention => DomainStrategy {
            school: "ישיבה בקדמת הכיתה...",
            home: "סידור סביבת למידה שקטה",
            tech: "טיימר ויזואלי",
            emotional: "שיחות רפלקציה קצרות",
        },
        Domain::Emotional => DomainStrategy {
            school: "מרחב רגיעה בכיתה...",
            home: "זמן איכות הורה-ילד",
            tech: "יומן רגשות דיגיטלי",
            emotional: "שיחות אישיות לחיזוק מסוגלות",
        },
        Domain::Social => DomainStrategy {
            school: "למידת עמיתים...",
            home: "הזמנת חבר אחד הביתה",
            tech: "קבוצות וואטסאפ כיתתיות",
            emotional: "ניתוח אירועים חברתיים",
        },
        Domain::Behavioral => DomainStrategy {
            school: "בניית חוזה התנהגותי אישי...",
            home: "תיאום ציפיות אחיד",
            tech: "אפליקציות למעקב",
            emotional: "לימוד טכניקות הרגעה עצמית",
        },
        Domain::Sensory => DomainStrategy {
            school: "שימוש באביזרים תחושתיים...",
            home: "חוגי ספורט/שחייה",
            tech: "מקלדת מותאמת",
            emotional: "לגיטימציה לצורך בתנועה",
        },
        Domain::Motivation => FALLBACK,
    }
}
