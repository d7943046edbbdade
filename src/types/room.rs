use super::RoomId;
use serde::{Deserialize, Serialize};

/// A physical room in the inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    #[serde(default)]
    pub is_laboratory: bool,
}

impl Room {
    /// Networking rooms are recognized by name
    pub fn is_cisco_lab(&self) -> bool {
        self.name.to_lowercase().contains("cisco")
    }

    /// The gymnasium may host several PE classes at once
    pub fn is_gymnasium(&self) -> bool {
        self.name.to_lowercase().contains("gymnasium")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(name: &str, is_laboratory: bool) -> Room {
        Room {
            id: RoomId(name.to_string()),
            name: name.to_string(),
            is_laboratory,
        }
    }

    #[test]
    fn test_special_rooms_detected_by_name() {
        assert!(room("Cisco Lab 1", true).is_cisco_lab());
        assert!(room("CISCO Networking Lab", true).is_cisco_lab());
        assert!(room("LPU_Gymnasium", false).is_gymnasium());
        assert!(!room("Room 204", false).is_cisco_lab());
        assert!(!room("Computer Lab 2", true).is_gymnasium());
    }
}
